//! Domain core: raw list items in, canonical employees out.
//!
//! Purpose: reconcile weakly typed list items into one [`Employee`] shape and
//! derive what the presentation layer needs to render it. Everything here is
//! pure except [`PagedFetcher`], whose two reads are the only suspension
//! points.
//!
//! Public surface:
//! - [`RawRecord`] / [`RawValue`]: closed model of one raw list item.
//! - [`extract_string`], [`looks_like_code`], [`find_human_name`]: extraction
//!   heuristics.
//! - [`normalize`]: the canonical record builder.
//! - [`color_from_string`], [`initials_from_name`]: avatar derivation.
//! - [`matches`]: roster search predicate.
//! - [`PagedFetcher`] / [`EmployeeDirectory`]: retrieval over a
//!   [`ports::RecordSource`].

mod code;
mod display;
mod draft;
mod employee;
mod employee_code;
mod extract;
mod fetch;
mod name;
pub mod ports;
mod raw;
mod search;

pub use self::code::looks_like_code;
pub use self::display::{
    FALLBACK_AVATAR_COLOR, avatar_color, color_from_string, initials_from_name, status_color,
};
pub use self::draft::{DraftError, EmployeeDraft};
pub use self::employee::{Employee, EmployeeStatus, ManagerRef, normalize};
pub use self::employee_code::{EMPLOYEE_CODE_PREFIX, next_employee_code, next_employee_code_for};
pub use self::extract::{LOOKUP_NAME_KEYS, extract_field, extract_first, extract_string};
pub use self::fetch::{DEFAULT_PAGE_SIZE, EmployeeDirectory, FetchError, PagedFetcher, RosterSnapshot};
pub use self::name::{PRIORITY_NAME_KEYS, find_human_name};
pub use self::raw::{RawRecord, RawValue};
pub use self::search::{filter_roster, matches};
