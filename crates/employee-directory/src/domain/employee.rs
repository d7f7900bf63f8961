//! Canonical employee record and the normaliser that builds it.
//!
//! ## Invariants
//! - `title` is never empty: it falls back to the raw `Title` column and
//!   finally to `#<id>`.
//! - Normalisation is total and deterministic; identical raw input always
//!   yields an identical [`Employee`].

use std::fmt;

use serde::Serialize;

use super::code::looks_like_code;
use super::extract::{extract_field, extract_first, extract_string};
use super::name::find_human_name;
use super::raw::{RawRecord, RawValue};

const ID_KEYS: [&str; 3] = ["Id", "ID", "id"];

/// Lifecycle status recorded against an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum EmployeeStatus {
    /// Working on site.
    Active,
    /// Working remotely.
    Remote,
    /// Temporarily away.
    OnLeave,
    /// No longer employed.
    Resigned,
    /// Any value outside the known choices, kept verbatim.
    Other(String),
}

impl EmployeeStatus {
    /// Parse a status choice, accepting both `OnLeave` and `On Leave`.
    ///
    /// ```
    /// use employee_directory::domain::EmployeeStatus;
    ///
    /// assert_eq!(EmployeeStatus::parse("on leave"), EmployeeStatus::OnLeave);
    /// assert_eq!(
    ///     EmployeeStatus::parse("Contractor"),
    ///     EmployeeStatus::Other("Contractor".to_owned())
    /// );
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        match compact.to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "remote" => Self::Remote,
            "onleave" => Self::OnLeave,
            "resigned" => Self::Resigned,
            _ => Self::Other(raw.trim().to_owned()),
        }
    }

    /// Choice key as stored in the list.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Remote => "Remote",
            Self::OnLeave => "OnLeave",
            Self::Resigned => "Resigned",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<EmployeeStatus> for String {
    fn from(value: EmployeeStatus) -> Self {
        value.as_str().to_owned()
    }
}

/// Snapshot of the manager lookup taken at fetch time.
///
/// This is a denormalised copy, not a live relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManagerRef {
    id: i64,
    title: String,
}

impl ManagerRef {
    /// Identifier of the manager's list item, `0` when unknown.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Manager display name, possibly empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Canonical personnel record produced by [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    id: i64,
    title: String,
    job_title: String,
    department: String,
    email: String,
    phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    manager: Option<ManagerRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<EmployeeStatus>,
    joining_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    employee_code: Option<String>,
}

impl Employee {
    /// List item identifier, `0` when the source supplied none.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Display name; never empty.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Name used for avatars and headings.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.title
    }

    /// Job title, empty when unknown.
    #[must_use]
    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    /// Department, empty when unknown.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Email address, empty when unknown.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number, empty when unknown.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Manager snapshot, when the item referenced one.
    #[must_use]
    pub const fn manager(&self) -> Option<&ManagerRef> {
        self.manager.as_ref()
    }

    /// Status choice, when set.
    #[must_use]
    pub const fn status(&self) -> Option<&EmployeeStatus> {
        self.status.as_ref()
    }

    /// Joining date as stored (usually ISO 8601), empty when unknown.
    #[must_use]
    pub fn joining_date(&self) -> &str {
        &self.joining_date
    }

    /// Raw `Title` value when it holds an employee code such as `EMP001`.
    #[must_use]
    pub fn employee_code(&self) -> Option<&str> {
        self.employee_code.as_deref()
    }
}

/// Build the canonical [`Employee`] for one raw list item.
///
/// # Examples
///
/// ```
/// use employee_directory::domain::{RawRecord, normalize};
///
/// let record = RawRecord::new()
///     .with("ID", "12")
///     .with("Title", "EMP012")
///     .with("Employee_x0020_Name", "Jane Doe")
///     .with("Position", "Engineer")
///     .with("Dept", "IT");
///
/// let employee = normalize(&record);
/// assert_eq!(employee.id(), 12);
/// assert_eq!(employee.title(), "Jane Doe");
/// assert_eq!(employee.job_title(), "Engineer");
/// assert_eq!(employee.department(), "IT");
/// assert_eq!(employee.email(), "");
/// assert_eq!(employee.employee_code(), Some("EMP012"));
///
/// assert_eq!(normalize(&RawRecord::new().with("Id", 9)).title(), "#9");
/// ```
#[must_use]
pub fn normalize(record: &RawRecord) -> Employee {
    let id = record_id(record);
    let raw_title = extract_field(record, "Title");
    let employee_code = raw_title.clone().filter(|title| looks_like_code(title));
    let title = find_human_name(record)
        .or(raw_title)
        .unwrap_or_else(|| format!("#{id}"));

    Employee {
        id,
        title,
        job_title: extract_first(record, &["JobTitle", "Position"]).unwrap_or_default(),
        department: extract_first(record, &["Department", "Dept"]).unwrap_or_default(),
        email: extract_first(record, &["Email", "EMail"]).unwrap_or_default(),
        phone: extract_first(record, &["Phone", "ContactNumber"]).unwrap_or_default(),
        manager: record.get("Manager").and_then(manager_ref),
        status: extract_field(record, "Status").map(|status| EmployeeStatus::parse(&status)),
        joining_date: extract_field(record, "JoiningDate").unwrap_or_default(),
        employee_code,
    }
}

fn record_id(record: &RawRecord) -> i64 {
    ID_KEYS
        .iter()
        .filter_map(|key| record.get(key))
        .chain(record.get_ignore_ascii_case("id"))
        .find(|value| !matches!(value, RawValue::Null))
        .map_or(0, coerce_id)
}

fn coerce_id(value: &RawValue) -> i64 {
    match value {
        RawValue::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(truncate_float))
            .unwrap_or(0),
        RawValue::String(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(truncate_float))
                .unwrap_or(0)
        }
        RawValue::Array(items) => items.first().map_or(0, coerce_id),
        RawValue::Null | RawValue::Bool(_) | RawValue::Object(_) => 0,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "identifiers are truncated toward zero and saturate at the i64 bounds"
)]
fn truncate_float(value: f64) -> Option<i64> {
    value.is_finite().then(|| value.trunc() as i64)
}

fn manager_ref(value: &RawValue) -> Option<ManagerRef> {
    match value {
        RawValue::Null => None,
        RawValue::Array(items) => items.first().and_then(manager_ref),
        RawValue::Object(lookup) => Some(ManagerRef {
            id: record_id(lookup),
            title: extract_string(value).unwrap_or_default(),
        }),
        scalar => extract_string(scalar).map(|title| ManagerRef { id: 0, title }),
    }
}
