// @generated by contractkit-codegen from openapi.yaml. Do not edit by hand.

use serde::{Deserialize, Serialize};

use super::PartyOut;

use crate::validation::{FieldViolation, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonResponse {
    pub id: String,
    pub party: PartyOut,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub is_active: bool,
}

impl Validate for PersonResponse {
    fn validate(&self) -> Vec<FieldViolation> {
        Vec::new()
    }
}
