//! File-backed record source reading a JSON export of the list.
//!
//! The export is either a bare array of items or the list endpoint's
//! `{"value": [...]}` envelope. An optional bulk limit makes the single read
//! refuse large exports the way the live list refuses reads above its view
//! threshold, which exercises the paginated fallback offline.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use futures_util::stream::{self, StreamExt};
use serde_json::Value;

use crate::domain::RawRecord;
use crate::domain::ports::{RecordPages, RecordSource, RecordSourceError};

/// Record source over a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileRecordSource {
    path: Utf8PathBuf,
    bulk_limit: Option<usize>,
}

impl JsonFileRecordSource {
    /// Read items from the JSON document at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            bulk_limit: None,
        }
    }

    /// Refuse single reads returning more than `limit` items.
    #[must_use]
    pub const fn with_bulk_limit(mut self, limit: usize) -> Self {
        self.bulk_limit = Some(limit);
        self
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<RawRecord>, RecordSourceError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            RecordSourceError::read(format!("'{}' does not name a file", self.path))
        })?;
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|error| RecordSourceError::read(format!("{error} ({parent})")))?;
        let contents = dir
            .read_to_string(file_name)
            .map_err(|error| RecordSourceError::read(format!("{error} ({})", self.path)))?;
        parse_records(&contents)
    }
}

#[async_trait]
impl RecordSource for JsonFileRecordSource {
    async fn read_all(&self) -> Result<Vec<RawRecord>, RecordSourceError> {
        let records = self.load()?;
        if let Some(limit) = self.bulk_limit.filter(|limit| records.len() > *limit) {
            return Err(RecordSourceError::truncated(format!(
                "{} items exceed the single read limit of {limit}",
                records.len()
            )));
        }
        Ok(records)
    }

    fn read_pages(&self, page_size: NonZeroUsize) -> RecordPages<'_> {
        stream::once(async move { self.load() })
            .flat_map(move |loaded| {
                let pages: Vec<Result<Vec<RawRecord>, RecordSourceError>> = match loaded {
                    Ok(records) => records
                        .chunks(page_size.get())
                        .map(|page| Ok(page.to_vec()))
                        .collect(),
                    Err(error) => vec![Err(error)],
                };
                stream::iter(pages)
            })
            .boxed()
    }
}

fn parse_records(contents: &str) -> Result<Vec<RawRecord>, RecordSourceError> {
    let document: Value = serde_json::from_str(contents)
        .map_err(|error| RecordSourceError::decode(format!("invalid JSON export: {error}")))?;
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("value") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(RecordSourceError::decode(
                    "export object must carry a `value` array",
                ));
            }
        },
        _ => {
            return Err(RecordSourceError::decode(
                "export must be an array of items or a `value` envelope",
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            RawRecord::try_from(item).map_err(|_| {
                RecordSourceError::decode(format!("item {index} is not a JSON object"))
            })
        })
        .collect()
}
