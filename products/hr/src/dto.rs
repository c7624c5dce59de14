use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Wire representation of an employee, used for both input and output.
///
/// Identity is `(id, email)`: two DTOs compare equal when both match, whatever
/// the remaining fields hold.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Absent means "active" when the record is written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl EmployeeDto {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: Some(email.into()),
            active: None,
        }
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }
}

impl PartialEq for EmployeeDto {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.email == other.email
    }
}

impl Eq for EmployeeDto {}

impl Hash for EmployeeDto {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.email.hash(state);
    }
}
