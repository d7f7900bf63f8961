//! Recognition of employee codes such as `EMP001`.

use std::sync::OnceLock;

use regex::Regex;

static CODE_RE: OnceLock<Regex> = OnceLock::new();

fn code_regex() -> &'static Regex {
    CODE_RE.get_or_init(|| {
        let pattern = r"(?i)^(?:[a-z]{1,4}[0-9]{2,6}|e[-_][0-9]+|[0-9]{3,6})$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("employee code regex failed to compile: {error}"))
    })
}

/// Return `true` when `value` is shaped like an employee code rather than a name.
///
/// Codes are 1-4 letters followed by 2-6 digits, `E-`/`E_` followed by
/// digits, or 3-6 bare digits. Empty input is never a code.
///
/// ```
/// use employee_directory::domain::looks_like_code;
///
/// assert!(looks_like_code("EMP001"));
/// assert!(looks_like_code("e_42"));
/// assert!(!looks_like_code("Jane Doe"));
/// assert!(!looks_like_code("A1"));
/// ```
#[must_use]
pub fn looks_like_code(value: &str) -> bool {
    code_regex().is_match(value)
}
