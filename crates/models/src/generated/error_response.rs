// @generated by contractkit-codegen from openapi.yaml. Do not edit by hand.

use serde::{Deserialize, Serialize};

use super::ErrorDetail;

use crate::validation::{FieldViolation, Validate};

/// Standard error response format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<Vec<ErrorDetail>>,
    pub status_code: i32,
}

impl Validate for ErrorResponse {
    fn validate(&self) -> Vec<FieldViolation> {
        Vec::new()
    }
}
