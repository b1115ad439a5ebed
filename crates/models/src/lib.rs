//! Data models for the HTTP contract.
//!
//! Everything under `generated/` is rebuilt from `api/openapi.yaml` by
//! `make generate` and must not be edited. Hand-written support the
//! generated code relies on lives next to it.

// rustfmt would reorder the module list and break `generate --check`.
#[rustfmt::skip]
mod generated;
pub mod validation;

pub use generated::*;
pub use validation::{FieldViolation, Validate};

impl From<FieldViolation> for ErrorDetail {
    fn from(v: FieldViolation) -> Self {
        Self {
            field: Some(v.field),
            message: v.message,
            code: Some(v.code.to_string()),
        }
    }
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
