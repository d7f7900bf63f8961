//! Driven port for reading raw list items from the external store.
//!
//! The store offers two read strategies: one unrestricted bulk read, and a
//! paginated read that yields pages lazily until the result set is
//! exhausted. Each page request may fail on its own.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};

use super::define_port_error;
use crate::domain::RawRecord;

define_port_error! {
    /// Errors raised by a record source.
    pub enum RecordSourceError {
        /// The request never produced a response.
        Transport {
            /// Transport failure detail.
            message: String,
        } => "record source transport failed: {message}",
        /// The store answered with a failure status.
        Status {
            /// HTTP-style status code.
            status: u16,
            /// Response body preview.
            message: String,
        } => "record source returned status {status}: {message}",
        /// The response body could not be decoded into list items.
        Decode {
            /// Decoder failure detail.
            message: String,
        } => "record source decode failed: {message}",
        /// The store refused or cut short an unrestricted read.
        Truncated {
            /// Why the bulk read is incomplete.
            message: String,
        } => "record source result truncated: {message}",
        /// Local source data could not be read.
        Read {
            /// I/O failure detail.
            message: String,
        } => "record source read failed: {message}",
    }
}

/// Lazy, finite, forward-only sequence of pages.
pub type RecordPages<'a> = BoxStream<'a, Result<Vec<RawRecord>, RecordSourceError>>;

/// Port for reading raw list items.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Read every item in one request.
    ///
    /// # Errors
    ///
    /// Returns [`RecordSourceError`] when the store rejects the read or the
    /// response cannot be decoded.
    async fn read_all(&self) -> Result<Vec<RawRecord>, RecordSourceError>;

    /// Read items in pages of at most `page_size`.
    ///
    /// The stream ends when the store reports no further pages. Dropping the
    /// stream abandons the remaining pages.
    fn read_pages(&self, page_size: NonZeroUsize) -> RecordPages<'_>;
}

/// In-memory source serving fixed items, used by fixtures and demos.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use employee_directory::domain::RawRecord;
/// use employee_directory::domain::ports::{FixtureRecordSource, RecordSource};
/// use futures_util::TryStreamExt;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let source = FixtureRecordSource::new(vec![
///     RawRecord::new().with("Id", 1),
///     RawRecord::new().with("Id", 2),
///     RawRecord::new().with("Id", 3),
/// ]);
/// let page_size = NonZeroUsize::new(2).expect("non-zero");
/// let pages: Vec<Vec<RawRecord>> = source.read_pages(page_size).try_collect().await?;
/// assert_eq!(pages.iter().map(Vec::len).collect::<Vec<_>>(), [2, 1]);
/// # Ok::<(), employee_directory::domain::ports::RecordSourceError>(())
/// # }).expect("pages load");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureRecordSource {
    records: Vec<RawRecord>,
}

impl FixtureRecordSource {
    /// Serve `records` from memory.
    #[must_use]
    pub const fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for FixtureRecordSource {
    async fn read_all(&self) -> Result<Vec<RawRecord>, RecordSourceError> {
        Ok(self.records.clone())
    }

    fn read_pages(&self, page_size: NonZeroUsize) -> RecordPages<'_> {
        chunked_pages(&self.records, page_size)
    }
}

/// Page an in-memory slice, preserving order.
fn chunked_pages(records: &[RawRecord], page_size: NonZeroUsize) -> RecordPages<'_> {
    stream::iter(records.chunks(page_size.get()).map(|page| Ok(page.to_vec()))).boxed()
}
