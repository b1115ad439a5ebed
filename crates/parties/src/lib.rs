//! Parties domain: people, the party directory records they hang off, and
//! stateless person summaries.
//!
//! Services consume and produce the generated contract models directly.
//! The shipped implementation keeps everything in process memory.

pub mod health;
pub mod person;
pub mod record;
pub mod seed;
pub mod summary;

pub use health::{HealthService, StaticHealthService};
pub use person::{InMemoryPersonService, PersonService, PersonServiceError};
pub use record::{PartyRecord, PersonRecord};
pub use seed::{SeedReport, seed_people};
pub use summary::{EchoPersonSummaryService, PersonSummaryService};
