// @generated by contractkit-codegen from openapi.yaml. Do not edit by hand.

use serde::{Deserialize, Serialize};

use crate::validation::{self, FieldViolation, Validate};

/// Partial update; omitted fields keep their value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Validate for PersonUpdate {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if let Some(value) = &self.first_name {
            validation::min_length("first_name", value, 1, &mut violations);
        }
        if let Some(value) = &self.last_name {
            validation::min_length("last_name", value, 1, &mut violations);
        }
        if let Some(value) = &self.email {
            validation::email("email", value, &mut violations);
        }
        violations
    }
}
