//! Domain ports for the external list store.

mod macros;
mod record_source;

pub(crate) use macros::define_port_error;
pub use record_source::{FixtureRecordSource, RecordPages, RecordSource, RecordSourceError};
