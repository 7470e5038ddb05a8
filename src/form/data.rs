use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven fields of the hiring form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    HrName,
    Phone,
    Email,
    Organization,
    Role,
    Salary,
    Description,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        FieldName::HrName,
        FieldName::Phone,
        FieldName::Email,
        FieldName::Organization,
        FieldName::Role,
        FieldName::Salary,
        FieldName::Description,
    ];

    /// Key used in the JSON payload.
    pub fn key(self) -> &'static str {
        match self {
            FieldName::HrName => "hrName",
            FieldName::Phone => "phone",
            FieldName::Email => "email",
            FieldName::Organization => "organization",
            FieldName::Role => "role",
            FieldName::Salary => "salary",
            FieldName::Description => "description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldName::HrName => "Name of HR",
            FieldName::Phone => "Phone Number",
            FieldName::Email => "Email",
            FieldName::Organization => "Organization Name",
            FieldName::Role => "Role (Hiring for)",
            FieldName::Salary => "Expected Salary (optional)",
            FieldName::Description => "Job Description",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, FieldName::Salary)
    }

    pub fn required() -> impl Iterator<Item = FieldName> {
        Self::ALL.into_iter().filter(|field| field.is_required())
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw field values exactly as typed. Never trimmed or normalized; the
/// serialized form is what gets posted to the application endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub hr_name: String,
    pub phone: String,
    pub email: String,
    pub organization: String,
    pub role: String,
    pub salary: String,
    pub description: String,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::HrName => &self.hr_name,
            FieldName::Phone => &self.phone,
            FieldName::Email => &self.email,
            FieldName::Organization => &self.organization,
            FieldName::Role => &self.role,
            FieldName::Salary => &self.salary,
            FieldName::Description => &self.description,
        }
    }

    /// Replace one field's value, leaving the others untouched.
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn slot_mut(&mut self, field: FieldName) -> &mut String {
        match field {
            FieldName::HrName => &mut self.hr_name,
            FieldName::Phone => &mut self.phone,
            FieldName::Email => &mut self.email,
            FieldName::Organization => &mut self.organization,
            FieldName::Role => &mut self.role,
            FieldName::Salary => &mut self.salary,
            FieldName::Description => &mut self.description,
        }
    }
}
