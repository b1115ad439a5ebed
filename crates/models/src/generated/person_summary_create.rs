// @generated by contractkit-codegen from openapi.yaml. Do not edit by hand.

use serde::{Deserialize, Serialize};

use crate::validation::{self, FieldViolation, Validate};

/// Payload for the stateless persons endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSummaryCreate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Validate for PersonSummaryCreate {
    fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if let Some(value) = &self.email {
            validation::email("email", value, &mut violations);
        }
        violations
    }
}
