//! Two-tier retrieval of the full roster.
//!
//! A single unrestricted read is tried first. Only after it has failed does
//! the fetcher switch strategy and walk the paginated read page by page.
//! This is a fixed fallback, not a retry policy: the second tier never
//! repeats the first call, and a failure in the second tier ends the fetch
//! with no partial result.

use std::num::NonZeroUsize;
use std::sync::Arc;

use futures_util::StreamExt;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::employee::{Employee, normalize};
use super::employee_code::next_employee_code_for;
use super::ports::{RecordSource, RecordSourceError};
use super::raw::RawRecord;

/// Page size used for the paginated fallback unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(2000) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Errors reported when neither retrieval strategy produced the roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The bulk read and the paginated fallback both failed.
    #[error("failed to load employees: {fallback} (bulk read: {primary})")]
    Exhausted {
        /// Failure reported by the bulk read.
        primary: RecordSourceError,
        /// Failure that stopped the paginated fallback.
        fallback: RecordSourceError,
    },
}

/// Retrieves every raw list item from a [`RecordSource`].
#[derive(Clone)]
pub struct PagedFetcher {
    source: Arc<dyn RecordSource>,
    page_size: NonZeroUsize,
}

impl PagedFetcher {
    /// Fetch from `source`, falling back to pages of `page_size`.
    #[must_use]
    pub const fn new(source: Arc<dyn RecordSource>, page_size: NonZeroUsize) -> Self {
        Self { source, page_size }
    }

    /// Configured fallback page size.
    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Retrieve all raw items in source order.
    ///
    /// Dropping the returned future between pages abandons the fetch and
    /// discards pages already received.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Exhausted`] when the bulk read fails and any
    /// page of the fallback fails too.
    pub async fn fetch_all(&self) -> Result<Vec<RawRecord>, FetchError> {
        let primary = match self.source.read_all().await {
            Ok(records) => {
                info!(count = records.len(), "loaded records with a single read");
                return Ok(records);
            }
            Err(bulk_error) => bulk_error,
        };

        warn!(error = %primary, page_size = self.page_size.get(), "bulk read failed; reading pages");
        let records = self.read_paged().await.map_err(|fallback| {
            error!(error = %fallback, "paged read failed");
            FetchError::Exhausted { primary, fallback }
        })?;
        info!(count = records.len(), "loaded records page by page");
        Ok(records)
    }

    async fn read_paged(&self) -> Result<Vec<RawRecord>, RecordSourceError> {
        let mut pages = self.source.read_pages(self.page_size);
        let mut records = Vec::new();
        let mut page_index = 0_usize;
        while let Some(page) = pages.next().await {
            let page_records = page?;
            debug!(page = page_index, count = page_records.len(), "received page");
            records.extend(page_records);
            page_index = page_index.saturating_add(1);
        }
        Ok(records)
    }
}

/// Fetch outcome shaped for display: on failure the roster is empty and
/// `error` explains why.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSnapshot {
    /// Normalised employees in source order.
    pub employees: Vec<Employee>,
    /// Next free employee code, allocated from every raw `Title`.
    pub next_employee_code: Option<String>,
    /// Displayable failure description, when the fetch failed.
    pub error: Option<String>,
}

impl From<Result<Vec<RawRecord>, FetchError>> for RosterSnapshot {
    fn from(result: Result<Vec<RawRecord>, FetchError>) -> Self {
        result.map_or_else(
            |err| Self {
                employees: Vec::new(),
                next_employee_code: None,
                error: Some(err.to_string()),
            },
            |records| Self {
                employees: records.iter().map(normalize).collect(),
                next_employee_code: Some(next_employee_code_for(&records)),
                error: None,
            },
        )
    }
}

/// Fetches raw items and normalises them into the canonical roster.
#[derive(Clone)]
pub struct EmployeeDirectory {
    fetcher: PagedFetcher,
}

impl EmployeeDirectory {
    /// Build a directory over an existing fetcher.
    #[must_use]
    pub const fn new(fetcher: PagedFetcher) -> Self {
        Self { fetcher }
    }

    /// Fetch and normalise every employee.
    ///
    /// # Errors
    ///
    /// Propagates [`FetchError`] from the fetcher; normalisation itself
    /// cannot fail.
    pub async fn fetch_employees(&self) -> Result<Vec<Employee>, FetchError> {
        let records = self.fetcher.fetch_all().await?;
        Ok(records.iter().map(normalize).collect())
    }

    /// Fetch the roster and fold any failure into a [`RosterSnapshot`].
    pub async fn load_roster(&self) -> RosterSnapshot {
        RosterSnapshot::from(self.fetcher.fetch_all().await)
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for snapshot folding; fetch orchestration is covered by
    //! `tests/paged_fetch.rs`.

    use super::*;

    #[test]
    fn failed_fetch_folds_into_an_empty_snapshot() {
        let error = FetchError::Exhausted {
            primary: RecordSourceError::truncated("more than 5000 items"),
            fallback: RecordSourceError::transport("connection reset"),
        };
        let snapshot = RosterSnapshot::from(Err(error));

        assert!(snapshot.employees.is_empty());
        assert!(snapshot.next_employee_code.is_none());
        assert_eq!(
            snapshot.error.as_deref(),
            Some(
                "failed to load employees: record source transport failed: connection reset \
                 (bulk read: record source result truncated: more than 5000 items)"
            )
        );
    }

    #[test]
    fn next_code_counts_titles_that_are_not_code_shaped() {
        let records = vec![
            RawRecord::new().with("Id", 1).with("Title", "EMP7"),
            RawRecord::new().with("Id", 2).with("Title", "42"),
            RawRecord::new().with("Id", 3).with("Title", "Jane Doe"),
        ];
        let snapshot = RosterSnapshot::from(Ok(records));

        assert_eq!(snapshot.employees.len(), 3);
        assert!(snapshot.employees.iter().all(|employee| employee.employee_code().is_none()));
        assert_eq!(snapshot.next_employee_code.as_deref(), Some("EMP043"));
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn default_page_size_matches_list_threshold_guidance() {
        assert_eq!(DEFAULT_PAGE_SIZE.get(), 2000);
    }
}
