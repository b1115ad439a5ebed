// @generated by contractkit-codegen from openapi.yaml. Do not edit by hand.

use serde::{Deserialize, Serialize};

use crate::validation::{self, FieldViolation, Validate};

/// Payload for creating a person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonCreate {
    /// First name is required.
    pub first_name: String,
    /// Last name is required.
    pub last_name: String,
    /// Date of birth (optional).
    #[serde(default)]
    pub date_of_birth: Option<chrono::NaiveDate>,
    /// Valid email address.
    pub email: String,
    /// Phone number (optional).
    #[serde(default)]
    pub phone: Option<String>,
}

impl Validate for PersonCreate {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        validation::min_length("first_name", &self.first_name, 1, &mut violations);
        validation::min_length("last_name", &self.last_name, 1, &mut violations);
        validation::email("email", &self.email, &mut violations);
        violations
    }
}
