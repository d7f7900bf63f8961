//! Human name resolution over heterogeneous list items.
//!
//! Deployments name their columns differently, so resolution runs three
//! scans in strict order and stops at the first acceptable value:
//!
//! 1. known name columns in [`PRIORITY_NAME_KEYS`] order,
//! 2. any other column whose key looks name-like,
//! 3. any column other than the identifier holding more than one UTF-16
//!    unit of text.
//!
//! Every scan rejects values that look like employee codes.

use std::sync::OnceLock;

use regex::Regex;

use super::code::looks_like_code;
use super::extract::extract_string;
use super::raw::{RawRecord, RawValue};

/// Columns known to hold a display name, most trusted first.
///
/// Resolution is order-sensitive; reordering changes which name wins on
/// items that carry several of these columns.
pub const PRIORITY_NAME_KEYS: [&str; 14] = [
    "FullName",
    "Full_x0020_Name",
    "EmployeeName",
    "Employee_x0020_Name",
    "DisplayName",
    "PreferredName",
    "Name",
    "Title",
    "Employee",
    "Person",
    "Author",
    "Editor",
    "CreatedBy",
    "ModifiedBy",
];

static NAME_KEY_RE: OnceLock<Regex> = OnceLock::new();

fn name_key_regex() -> &'static Regex {
    NAME_KEY_RE.get_or_init(|| {
        let pattern = "(?i)name|fullname|display|preferred|employee|person|contact";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("name key regex failed to compile: {error}"))
    })
}

/// Find the best human-readable name in `record`.
///
/// # Examples
///
/// ```
/// use employee_directory::domain::{RawRecord, find_human_name};
///
/// let record = RawRecord::new()
///     .with("Title", "EMP001")
///     .with("FullName", "Jane Doe");
/// assert_eq!(find_human_name(&record).as_deref(), Some("Jane Doe"));
///
/// let codes_only = RawRecord::new().with("Title", "EMP001");
/// assert_eq!(find_human_name(&codes_only), None);
/// ```
#[must_use]
pub fn find_human_name(record: &RawRecord) -> Option<String> {
    priority_scan(record)
        .or_else(|| pattern_scan(record))
        .or_else(|| fallback_scan(record))
}

fn priority_scan(record: &RawRecord) -> Option<String> {
    PRIORITY_NAME_KEYS
        .iter()
        .filter_map(|key| record.get(key))
        .find_map(accept_name)
}

fn pattern_scan(record: &RawRecord) -> Option<String> {
    record
        .iter()
        .filter(|(key, _)| !PRIORITY_NAME_KEYS.contains(key) && name_key_regex().is_match(key))
        .find_map(|(_, value)| accept_name(value))
}

fn fallback_scan(record: &RawRecord) -> Option<String> {
    record
        .iter()
        .filter(|(key, _)| !key.eq_ignore_ascii_case("id"))
        .find_map(|(_, value)| {
            extract_string(value)
                .filter(|text| text.encode_utf16().count() > 1 && !looks_like_code(text))
        })
}

fn accept_name(value: &RawValue) -> Option<String> {
    extract_string(value).filter(|text| !looks_like_code(text))
}
