//! Scalar extraction from weakly typed column values.
//!
//! A missing or unusable value is not an error here: every function returns
//! `None` and callers pick the next fallback.

use super::raw::{RawRecord, RawValue};

/// Sub-keys probed, in order, when a column holds a person or lookup object.
pub const LOOKUP_NAME_KEYS: [&str; 6] = ["Title", "Name", "DisplayName", "FullName", "Label", "Email"];

/// Extract a trimmed, non-empty string from any raw value.
///
/// Numbers render in their decimal form, arrays yield their first element,
/// and objects yield the first non-empty string under [`LOOKUP_NAME_KEYS`].
///
/// # Examples
///
/// ```
/// use employee_directory::domain::{RawRecord, RawValue, extract_string};
///
/// let person = RawRecord::new().with("Email", "ada@example.com").with("Title", " Ada ");
/// assert_eq!(extract_string(&RawValue::from(person)).as_deref(), Some("Ada"));
/// assert_eq!(extract_string(&RawValue::from(42)).as_deref(), Some("42"));
/// assert_eq!(extract_string(&RawValue::from("   ")), None);
/// ```
#[must_use]
pub fn extract_string(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Null | RawValue::Bool(_) => None,
        RawValue::String(text) => non_blank(text),
        RawValue::Number(number) => Some(number.to_string()),
        RawValue::Array(items) => items.first().and_then(extract_string),
        RawValue::Object(lookup) => LOOKUP_NAME_KEYS
            .iter()
            .find_map(|key| match lookup.get(key) {
                Some(RawValue::String(text)) => non_blank(text),
                _ => None,
            }),
    }
}

/// Extract the string stored under `key`, if any.
#[must_use]
pub fn extract_field(record: &RawRecord, key: &str) -> Option<String> {
    record.get(key).and_then(extract_string)
}

/// Extract the first usable string among `keys`, tried in order.
#[must_use]
pub fn extract_first(record: &RawRecord, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| extract_field(record, key))
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    //! Covers each raw value shape.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn raw(value: serde_json::Value) -> RawValue {
        RawValue::from(value)
    }

    #[rstest]
    #[case(json!(null), None)]
    #[case(json!(true), None)]
    #[case(json!("  Jane Doe "), Some("Jane Doe"))]
    #[case(json!(""), None)]
    #[case(json!(" \t "), None)]
    #[case(json!(17), Some("17"))]
    #[case(json!(1.5), Some("1.5"))]
    #[case(json!([]), None)]
    #[case(json!(["first", "second"]), Some("first"))]
    #[case(json!([[" nested "]]), Some("nested"))]
    #[case(json!({"Other": "x"}), None)]
    fn extracts_scalars(#[case] value: serde_json::Value, #[case] expected: Option<&str>) {
        assert_eq!(extract_string(&raw(value)).as_deref(), expected);
    }

    #[rstest]
    #[case(json!({"Email": "a@b.c", "Label": "Lab", "Name": "Nom"}), "Nom")]
    #[case(json!({"Title": "  ", "DisplayName": "Shown"}), "Shown")]
    #[case(json!({"FullName": "Full", "Email": "a@b.c"}), "Full")]
    #[case(json!({"Email": "only@example.com"}), "only@example.com")]
    fn objects_probe_sub_keys_in_priority_order(
        #[case] value: serde_json::Value,
        #[case] expected: &str,
    ) {
        assert_eq!(extract_string(&raw(value)).as_deref(), Some(expected));
    }

    #[test]
    fn object_sub_keys_must_hold_strings() {
        let value = raw(json!({"Title": 12, "Name": {"Title": "deep"}}));
        assert_eq!(extract_string(&value), None);
    }

    #[test]
    fn arrays_of_people_yield_the_first_person() {
        let value = raw(json!([{"Title": "Ada"}, {"Title": "Grace"}]));
        assert_eq!(extract_string(&value).as_deref(), Some("Ada"));
    }

    #[test]
    fn extract_first_skips_blank_columns() {
        let record = RawRecord::new()
            .with("JobTitle", " ")
            .with("Position", "Engineer");
        assert_eq!(
            extract_first(&record, &["JobTitle", "Position"]).as_deref(),
            Some("Engineer")
        );
        assert_eq!(extract_first(&record, &["Missing"]), None);
    }
}
