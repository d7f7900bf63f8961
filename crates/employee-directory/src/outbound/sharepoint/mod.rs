//! SharePoint list REST adapter.
//!
//! This module provides a thin HTTP implementation of the `RecordSource`
//! port over the `_api/web/lists` endpoint.

mod dto;
mod http_source;

pub use http_source::{SharePointListSource, SharePointSetupError};
