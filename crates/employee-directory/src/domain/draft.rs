//! New-employee drafts and the field set a create call would submit.

use thiserror::Error;

use super::employee::EmployeeStatus;

/// Validation failures for an [`EmployeeDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    /// The employee name was missing or blank.
    #[error("employee name is required")]
    MissingEmployeeName,
    /// The job title was missing or blank.
    #[error("job title is required")]
    MissingJobTitle,
}

/// Form input for a new employee before it is written to the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    /// Full name; required.
    pub employee_name: String,
    /// Job title; required.
    pub job_title: String,
    /// Department choice.
    pub department: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Status choice.
    pub status: Option<EmployeeStatus>,
    /// Joining date in ISO 8601 form.
    pub joining_date: Option<String>,
}

impl EmployeeDraft {
    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] naming the first blank required field.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.employee_name.trim().is_empty() {
            return Err(DraftError::MissingEmployeeName);
        }
        if self.job_title.trim().is_empty() {
            return Err(DraftError::MissingJobTitle);
        }
        Ok(())
    }

    /// Validate and produce the ordered column/value pairs for a create call.
    ///
    /// `employee_code` is written to `Title`. Absent or blank optional fields
    /// are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError`] when validation fails.
    ///
    /// ```
    /// use employee_directory::domain::EmployeeDraft;
    ///
    /// let draft = EmployeeDraft {
    ///     employee_name: "Jane Doe".to_owned(),
    ///     job_title: "Engineer".to_owned(),
    ///     ..EmployeeDraft::default()
    /// };
    /// let fields = draft.into_fields("EMP004").expect("draft is valid");
    /// assert_eq!(fields[0], ("Title", "EMP004".to_owned()));
    /// assert_eq!(fields.len(), 3);
    /// ```
    pub fn into_fields(
        self,
        employee_code: &str,
    ) -> Result<Vec<(&'static str, String)>, DraftError> {
        self.validate()?;
        let optional = [
            ("Department", self.department),
            ("Phone", self.phone),
            ("Status", self.status.map(String::from)),
            ("JoiningDate", self.joining_date),
        ];
        let mut fields = vec![
            ("Title", employee_code.to_owned()),
            ("EmployeeName", self.employee_name.trim().to_owned()),
            ("JobTitle", self.job_title.trim().to_owned()),
        ];
        fields.extend(optional.into_iter().filter_map(|(key, value)| {
            value
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty())
                .map(|text| (key, text))
        }));
        Ok(fields)
    }
}
