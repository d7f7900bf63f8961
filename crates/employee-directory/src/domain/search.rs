//! Free-text roster search.

use super::employee::Employee;

/// `true` when `query` is blank or occurs, ignoring case, in the employee's
/// title, department or email.
///
/// Each field is compared on its own; a query spanning two fields does not
/// match.
///
/// ```
/// use employee_directory::domain::{RawRecord, matches, normalize};
///
/// let jane = normalize(&RawRecord::new().with("Title", "Jane Doe"));
/// assert!(matches(&jane, ""));
/// assert!(matches(&jane, "jane"));
/// assert!(!matches(&jane, "xyz"));
/// ```
#[must_use]
pub fn matches(employee: &Employee, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    [employee.title(), employee.department(), employee.email()]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Lazily filter `employees` down to those matching `query`, keeping order.
pub fn filter_roster<'a>(
    employees: &'a [Employee],
    query: &'a str,
) -> impl Iterator<Item = &'a Employee> + 'a {
    employees
        .iter()
        .filter(move |employee| matches(employee, query))
}
