//! Stateless person summaries: echo the payload back with a fresh id.

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use contractkit_core::DomainError;
use contractkit_models::{PersonSummary, PersonSummaryCreate};

use crate::person::ensure_valid;

/// Backs `POST /persons`.
#[async_trait]
pub trait PersonSummaryService: Send + Sync {
    async fn create_person_summary(
        &self,
        input: PersonSummaryCreate,
    ) -> Result<PersonSummary, DomainError>;
}

/// Stores nothing; every call mints a new id.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoPersonSummaryService;

#[async_trait]
impl PersonSummaryService for EchoPersonSummaryService {
    async fn create_person_summary(
        &self,
        input: PersonSummaryCreate,
    ) -> Result<PersonSummary, DomainError> {
        ensure_valid(&input)?;
        let summary = PersonSummary {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
        };
        debug!(summary_id = %summary.id, "person summary issued");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: Option<&str>, email: Option<&str>) -> PersonSummaryCreate {
        PersonSummaryCreate {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn echoes_fields_with_a_fresh_id() {
        let svc = EchoPersonSummaryService;
        let a = svc
            .create_person_summary(input(Some("Jane"), Some("jane@example.com")))
            .await
            .unwrap();
        let b = svc
            .create_person_summary(input(Some("Jane"), Some("jane@example.com")))
            .await
            .unwrap();

        assert_eq!(a.name.as_deref(), Some("Jane"));
        assert_eq!(a.email.as_deref(), Some("jane@example.com"));
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn empty_payload_is_accepted() {
        let s = EchoPersonSummaryService
            .create_person_summary(input(None, None))
            .await
            .unwrap();
        assert_eq!(s.name, None);
        assert_eq!(s.email, None);
    }

    #[tokio::test]
    async fn malformed_email_is_a_validation_error() {
        let err = EchoPersonSummaryService
            .create_person_summary(input(None, Some("invalid-email")))
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.starts_with("email")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
