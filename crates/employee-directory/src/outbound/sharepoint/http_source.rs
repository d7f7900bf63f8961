//! Reqwest-backed SharePoint list source adapter.
//!
//! This adapter owns transport details only: items URL construction, request
//! timeout and HTTP error mapping, continuation link handling, and JSON
//! decoding into raw list items. Authentication is left to the caller, who
//! may inject a pre-configured [`Client`].

use std::num::NonZeroUsize;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{self, StreamExt};
use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::debug;

use super::dto::ListItemsPageDto;
use crate::domain::RawRecord;
use crate::domain::ports::{RecordPages, RecordSource, RecordSourceError};

const ACCEPT_NOMETADATA: &str = "application/json;odata=nometadata";
const MANAGER_SELECT: &str = "*,Manager/Id,Manager/Title";
const MANAGER_EXPAND: &str = "Manager";

/// Errors raised while constructing a [`SharePointListSource`].
#[derive(Debug, Error)]
pub enum SharePointSetupError {
    /// The reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The site URL cannot carry a path.
    #[error("site URL cannot be used as a base: {url}")]
    InvalidSiteUrl {
        /// Offending site URL.
        url: String,
    },
}

/// Record source reading items from one SharePoint list over REST.
pub struct SharePointListSource {
    client: Client,
    items_url: Url,
}

impl SharePointListSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be constructed or the site URL
    /// cannot be extended with the list endpoint path.
    pub fn new(
        site_url: &Url,
        list_name: &str,
        timeout: Duration,
    ) -> Result<Self, SharePointSetupError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, site_url, list_name)
    }

    /// Build an adapter over a caller-supplied client, e.g. one carrying
    /// authentication headers.
    ///
    /// # Errors
    ///
    /// Returns an error when the site URL cannot be extended with the list
    /// endpoint path.
    pub fn with_client(
        client: Client,
        site_url: &Url,
        list_name: &str,
    ) -> Result<Self, SharePointSetupError> {
        Ok(Self {
            client,
            items_url: items_url(site_url, list_name)?,
        })
    }

    /// Items endpoint used for the bulk read.
    #[must_use]
    pub const fn items_url(&self) -> &Url {
        &self.items_url
    }

    fn first_page_url(&self, page_size: NonZeroUsize) -> Url {
        let mut url = self.items_url.clone();
        url.query_pairs_mut()
            .append_pair("$top", &page_size.get().to_string());
        url
    }

    async fn get_page(&self, url: Url) -> Result<ListItemsPageDto, RecordSourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_NOMETADATA)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_page(body.as_ref())
    }
}

#[async_trait]
impl RecordSource for SharePointListSource {
    async fn read_all(&self) -> Result<Vec<RawRecord>, RecordSourceError> {
        let page = self.get_page(self.items_url.clone()).await?;
        if page.next_link.is_some() {
            return Err(RecordSourceError::truncated(format!(
                "list returned {} items and a continuation link",
                page.value.len()
            )));
        }
        Ok(page.value)
    }

    fn read_pages(&self, page_size: NonZeroUsize) -> RecordPages<'_> {
        let first = self.first_page_url(page_size);
        stream::try_unfold(Some(first), move |next| self.next_page(next)).boxed()
    }
}

type PageStep = Option<(Vec<RawRecord>, Option<Url>)>;

impl SharePointListSource {
    async fn next_page(&self, next: Option<Url>) -> Result<PageStep, RecordSourceError> {
        let Some(url) = next else {
            return Ok(None);
        };
        let page = self.get_page(url).await?;
        let next_url = page
            .next_link
            .as_deref()
            .map(|link| resolve_next_link(&self.items_url, link))
            .transpose()?;
        debug!(
            count = page.value.len(),
            has_next = next_url.is_some(),
            "fetched list page"
        );
        Ok(Some((page.value, next_url)))
    }
}

fn items_url(site_url: &Url, list_name: &str) -> Result<Url, SharePointSetupError> {
    let list_segment = format!("getbytitle('{}')", list_name.replace('\'', "''"));
    let mut url = site_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| SharePointSetupError::InvalidSiteUrl {
            url: site_url.to_string(),
        })?
        .pop_if_empty()
        .extend(["_api", "web", "lists", list_segment.as_str(), "items"]);
    url.query_pairs_mut()
        .append_pair("$select", MANAGER_SELECT)
        .append_pair("$expand", MANAGER_EXPAND);
    Ok(url)
}

fn resolve_next_link(items_url: &Url, link: &str) -> Result<Url, RecordSourceError> {
    items_url.join(link).map_err(|error| {
        RecordSourceError::decode(format!("invalid continuation link '{link}': {error}"))
    })
}

fn parse_page(body: &[u8]) -> Result<ListItemsPageDto, RecordSourceError> {
    serde_json::from_slice(body).map_err(|error| {
        RecordSourceError::decode(format!("invalid list items payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> RecordSourceError {
    RecordSourceError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RecordSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        preview
    };
    RecordSourceError::status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use rstest::rstest;

    use super::*;
    use crate::domain::RawValue;

    fn site() -> Url {
        Url::parse("https://contoso.sharepoint.com/sites/hr/").expect("valid URL")
    }

    #[test]
    fn builds_items_url_under_the_site() {
        let url = items_url(&site(), "Employees").expect("URL should build");

        assert_eq!(
            url.path(),
            "/sites/hr/_api/web/lists/getbytitle('Employees')/items"
        );
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            [
                ("$select".to_owned(), MANAGER_SELECT.to_owned()),
                ("$expand".to_owned(), MANAGER_EXPAND.to_owned()),
            ]
        );
    }

    #[test]
    fn escapes_quotes_and_spaces_in_list_titles() {
        let url = items_url(&site(), "O'Neil Staff").expect("URL should build");
        assert!(
            url.path()
                .ends_with("/getbytitle('O''Neil%20Staff')/items"),
            "unexpected path {}",
            url.path()
        );
    }

    #[test]
    fn rejects_sites_that_cannot_be_a_base() {
        let site = Url::parse("mailto:hr@example.com").expect("valid URL");
        let error = items_url(&site, "Employees").expect_err("URL must fail");
        assert!(matches!(error, SharePointSetupError::InvalidSiteUrl { .. }));
    }

    #[test]
    fn first_page_url_carries_top() {
        let source = SharePointListSource::with_client(Client::new(), &site(), "Employees")
            .expect("source should build");
        let size = NonZeroUsize::new(500).expect("non-zero");
        let url = source.first_page_url(size);
        assert!(
            url.query_pairs()
                .any(|(key, value)| key == "$top" && value == "500")
        );
    }

    #[rstest]
    #[case::nometadata(r#"{"value": [{"Id": 1}], "odata.nextLink": "https://x/next"}"#)]
    #[case::odata_v4(r#"{"value": [{"Id": 1}], "@odata.nextLink": "https://x/next"}"#)]
    #[case::verbose(r#"{"value": [{"Id": 1}], "__next": "https://x/next"}"#)]
    fn reads_every_continuation_link_spelling(#[case] body: &str) {
        let page = parse_page(body.as_bytes()).expect("page should decode");
        assert_eq!(page.next_link.as_deref(), Some("https://x/next"));
        assert_eq!(page.value.len(), 1);
    }

    #[test]
    fn expanded_manager_lookups_stay_nested() {
        let body = r#"{"value": [{"Id": 4, "Manager": {"Id": 9, "Title": "Ada"}}]}"#;
        let page = parse_page(body.as_bytes()).expect("page should decode");
        let item = page.value.first().expect("one item");
        assert!(matches!(item.get("Manager"), Some(RawValue::Object(_))));
        assert!(page.next_link.is_none());
    }

    #[test]
    fn malformed_payloads_map_to_decode_errors() {
        let error = parse_page(b"<html>").expect_err("decode should fail");
        assert!(matches!(error, RecordSourceError::Decode { .. }));
    }

    #[rstest]
    #[case::relative("items?$skiptoken=Paged%3dTRUE", "/sites/hr/_api/web/lists/getbytitle('Employees')/items")]
    #[case::absolute(
        "https://contoso.sharepoint.com/sites/hr/_api/next",
        "/sites/hr/_api/next"
    )]
    fn resolves_continuation_links_against_the_items_url(
        #[case] link: &str,
        #[case] expected_path: &str,
    ) {
        let base = items_url(&site(), "Employees").expect("URL should build");
        let next = resolve_next_link(&base, link).expect("link should resolve");
        assert_eq!(next.path(), expected_path);
    }

    #[rstest]
    #[case::throttled(StatusCode::TOO_MANY_REQUESTS, 429)]
    #[case::threshold(StatusCode::INTERNAL_SERVER_ERROR, 500)]
    #[case::missing_list(StatusCode::NOT_FOUND, 404)]
    fn maps_http_statuses_to_status_errors(#[case] status: StatusCode, #[case] expected: u16) {
        let error = map_status_error(status, b"{\"odata.error\": {\"code\": \"-2147024860\"}}");
        match error {
            RecordSourceError::Status { status: code, message } => {
                assert_eq!(code, expected);
                assert!(message.contains("odata.error"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_bodies_fall_back_to_the_reason_phrase() {
        let error = map_status_error(StatusCode::FORBIDDEN, b"");
        assert_eq!(
            error.to_string(),
            "record source returned status 403: Forbidden"
        );
    }

    #[test]
    fn body_preview_compacts_and_truncates() {
        let body = format!("a  b\n{}", "c".repeat(200));
        let preview = body_preview(body.as_bytes());
        assert!(preview.starts_with("a b c"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
