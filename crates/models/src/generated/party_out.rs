// @generated by contractkit-codegen from openapi.yaml. Do not edit by hand.

use serde::{Deserialize, Serialize};

use super::PartyStatus;

use crate::validation::{FieldViolation, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyOut {
    pub id: String,
    pub party_type: String,
    pub display_name: String,
    pub status: PartyStatus,
}

impl Validate for PartyOut {
    fn validate(&self) -> Vec<FieldViolation> {
        Vec::new()
    }
}
