// @generated by contractkit-codegen from openapi.yaml. Do not edit by hand.

mod health_status;
mod person_create;
mod person_update;
mod party_status;
mod party_out;
mod person_response;
mod error_detail;
mod error_response;
mod person_summary_create;
mod person_summary;

pub use health_status::HealthStatus;
pub use person_create::PersonCreate;
pub use person_update::PersonUpdate;
pub use party_status::PartyStatus;
pub use party_out::PartyOut;
pub use person_response::PersonResponse;
pub use error_detail::ErrorDetail;
pub use error_response::ErrorResponse;
pub use person_summary_create::PersonSummaryCreate;
pub use person_summary::PersonSummary;
