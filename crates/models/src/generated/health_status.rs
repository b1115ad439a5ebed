// @generated by contractkit-codegen from openapi.yaml. Do not edit by hand.

use serde::{Deserialize, Serialize};

use crate::validation::{FieldViolation, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl Validate for HealthStatus {
    fn validate(&self) -> Vec<FieldViolation> {
        Vec::new()
    }
}
