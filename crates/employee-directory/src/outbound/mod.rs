//! Outbound adapters implementing the record source port.

mod json_file;
pub mod sharepoint;

pub use json_file::JsonFileRecordSource;
