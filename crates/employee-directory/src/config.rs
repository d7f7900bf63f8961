//! Directory configuration loaded via OrthoConfig.
//!
//! Values layer from CLI flags, `EMPLOYEE_DIRECTORY_*` environment variables
//! and an optional configuration file. Accessors apply the defaults.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::DEFAULT_PAGE_SIZE;
use crate::domain::ports::RecordSource;
use crate::outbound::JsonFileRecordSource;
use crate::outbound::sharepoint::{SharePointListSource, SharePointSetupError};

const DEFAULT_LIST_NAME: &str = "Employees";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Errors raised while turning settings into a record source.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Neither a records file nor a site URL was configured.
    #[error("configure either records_path or site_url")]
    MissingSource,
    /// The site URL did not parse.
    #[error("invalid site URL '{url}': {source}")]
    InvalidSiteUrl {
        /// Configured value.
        url: String,
        /// Parser failure.
        source: url::ParseError,
    },
    /// The records path is not valid UTF-8.
    #[error("records path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the configured path.
        path: String,
    },
    /// The list adapter could not be constructed.
    #[error(transparent)]
    SharePoint(#[from] SharePointSetupError),
}

/// Configuration values controlling where and how the roster is read.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EMPLOYEE_DIRECTORY")]
pub struct DirectorySettings {
    /// Site hosting the employee list, e.g. `https://contoso.sharepoint.com/sites/hr`.
    pub site_url: Option<String>,
    /// Title of the employee list.
    pub list_name: Option<String>,
    /// Items per request for the paginated fallback.
    pub page_size: Option<usize>,
    /// JSON export to read instead of the live list.
    pub records_path: Option<PathBuf>,
    /// Largest single read the JSON source serves before refusing.
    pub bulk_limit: Option<usize>,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: Option<u64>,
    /// Roster search query.
    pub query: Option<String>,
}

impl DirectorySettings {
    /// Return the configured list title, falling back to the default.
    #[must_use]
    pub fn list_name(&self) -> &str {
        self.list_name.as_deref().unwrap_or(DEFAULT_LIST_NAME)
    }

    /// Return the fallback page size; zero selects the default.
    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
            .and_then(NonZeroUsize::new)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Return the HTTP request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    /// Return the search query, empty when unset.
    #[must_use]
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }

    /// Build the record source these settings select.
    ///
    /// A records file takes precedence over a site URL.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when no source is configured or the
    /// configured one cannot be built.
    pub fn record_source(&self) -> Result<Arc<dyn RecordSource>, SettingsError> {
        if let Some(path) = &self.records_path {
            let utf8 = Utf8PathBuf::try_from(path.clone()).map_err(|error| {
                SettingsError::NonUtf8Path {
                    path: error.into_path_buf().display().to_string(),
                }
            })?;
            let mut source = JsonFileRecordSource::new(utf8);
            if let Some(limit) = self.bulk_limit {
                source = source.with_bulk_limit(limit);
            }
            return Ok(Arc::new(source));
        }

        let raw_url = self.site_url.as_deref().ok_or(SettingsError::MissingSource)?;
        let site_url = Url::parse(raw_url).map_err(|source| SettingsError::InvalidSiteUrl {
            url: raw_url.to_owned(),
            source,
        })?;
        let source = SharePointListSource::new(&site_url, self.list_name(), self.timeout())?;
        Ok(Arc::new(source))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for directory configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const KEYS: [&str; 7] = [
        "EMPLOYEE_DIRECTORY_SITE_URL",
        "EMPLOYEE_DIRECTORY_LIST_NAME",
        "EMPLOYEE_DIRECTORY_PAGE_SIZE",
        "EMPLOYEE_DIRECTORY_RECORDS_PATH",
        "EMPLOYEE_DIRECTORY_BULK_LIMIT",
        "EMPLOYEE_DIRECTORY_TIMEOUT_SECONDS",
        "EMPLOYEE_DIRECTORY_QUERY",
    ];

    fn load_from_empty_args() -> DirectorySettings {
        DirectorySettings::load_from_iter([OsString::from("employee-directory")])
            .expect("config should load")
    }

    fn cleared() -> [(&'static str, Option<String>); 7] {
        KEYS.map(|key| (key, None::<String>))
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(settings.list_name(), DEFAULT_LIST_NAME);
        assert_eq!(settings.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.query(), "");
        assert!(settings.records_path.is_none());
        assert!(matches!(
            settings.record_source(),
            Err(SettingsError::MissingSource)
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        for (key, value) in &mut vars {
            *value = match *key {
                "EMPLOYEE_DIRECTORY_SITE_URL" => Some("https://contoso.example/sites/hr".to_owned()),
                "EMPLOYEE_DIRECTORY_LIST_NAME" => Some("Staff".to_owned()),
                "EMPLOYEE_DIRECTORY_PAGE_SIZE" => Some("250".to_owned()),
                "EMPLOYEE_DIRECTORY_TIMEOUT_SECONDS" => Some("5".to_owned()),
                "EMPLOYEE_DIRECTORY_QUERY" => Some("finance".to_owned()),
                _ => None,
            };
        }
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(settings.list_name(), "Staff");
        assert_eq!(settings.page_size().get(), 250);
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.query(), "finance");
        assert!(settings.record_source().is_ok());
    }

    #[rstest]
    #[case(Some(0), 2000)]
    #[case(Some(1), 1)]
    #[case(None, 2000)]
    fn zero_page_size_falls_back_to_default(#[case] configured: Option<usize>, #[case] expected: usize) {
        let settings = DirectorySettings {
            page_size: configured,
            ..blank()
        };
        assert_eq!(settings.page_size().get(), expected);
    }

    #[rstest]
    fn records_path_wins_over_site_url() {
        let settings = DirectorySettings {
            site_url: Some("not a url".to_owned()),
            records_path: Some(PathBuf::from("fixtures/employees.json")),
            ..blank()
        };
        assert!(settings.record_source().is_ok());
    }

    #[rstest]
    fn unparsable_site_urls_are_reported() {
        let settings = DirectorySettings {
            site_url: Some("not a url".to_owned()),
            ..blank()
        };
        let error = settings.record_source().err().expect("source must fail");
        assert!(
            matches!(error, SettingsError::InvalidSiteUrl { ref url, .. } if url == "not a url"),
            "unexpected error: {error}"
        );
    }

    fn blank() -> DirectorySettings {
        DirectorySettings {
            site_url: None,
            list_name: None,
            page_size: None,
            records_path: None,
            bulk_limit: None,
            timeout_seconds: None,
            query: None,
        }
    }
}
