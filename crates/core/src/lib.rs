//! `contractkit-core` — shared domain primitives.
//!
//! Typed identifiers and the domain error model used by the service layer.
//! No IO, no HTTP.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::DomainError;
pub use id::{PartyId, PersonId};
