// @generated by contractkit-codegen from openapi.yaml. Do not edit by hand.

use serde::{Deserialize, Serialize};

use crate::validation::{FieldViolation, Validate};

/// Detail about a specific error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl Validate for ErrorDetail {
    fn validate(&self) -> Vec<FieldViolation> {
        Vec::new()
    }
}
