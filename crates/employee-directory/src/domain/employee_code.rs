//! Allocation of the next `EMP###` code for a new list item.
//!
//! The list keeps employee codes in its `Title` column. The next code is one
//! above the highest number already in use, zero-padded to three digits.

use super::extract::extract_field;
use super::raw::RawRecord;

/// Prefix carried by every allocated employee code.
pub const EMPLOYEE_CODE_PREFIX: &str = "EMP";

/// Minimum number of digits in an allocated code.
const CODE_DIGITS: usize = 3;

/// Compute the next free employee code from existing `Title` values.
///
/// Blank titles count as `0`; titles without a leading number are ignored.
/// The allocated number is never below 1.
///
/// ```
/// use employee_directory::domain::next_employee_code;
///
/// assert_eq!(next_employee_code(["EMP001", "EMP012", "Jane"]), "EMP013");
/// assert_eq!(next_employee_code(Vec::<&str>::new()), "EMP001");
/// assert_eq!(next_employee_code(["EMP999"]), "EMP1000");
/// ```
#[must_use]
pub fn next_employee_code<I, S>(titles: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let highest = titles
        .into_iter()
        .filter_map(|title| code_number(title.as_ref()))
        .max();
    let next = highest.map_or(1, |number| number.saturating_add(1)).max(1);
    format!("{EMPLOYEE_CODE_PREFIX}{next:0width$}", width = CODE_DIGITS)
}

/// Compute the next employee code from raw list items.
#[must_use]
pub fn next_employee_code_for(records: &[RawRecord]) -> String {
    next_employee_code(
        records
            .iter()
            .map(|record| extract_field(record, "Title").unwrap_or_default()),
    )
}

fn code_number(title: &str) -> Option<i64> {
    let digits = title.strip_prefix(EMPLOYEE_CODE_PREFIX).unwrap_or(title);
    if digits.is_empty() {
        return Some(0);
    }
    parse_leading_integer(digits)
}

fn parse_leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, unsigned) = trimmed.strip_prefix('-').map_or_else(
        || (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        |rest| (true, rest),
    );
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let number: i64 = unsigned.get(..end)?.parse().ok()?;
    Some(if negative { -number } else { number })
}
