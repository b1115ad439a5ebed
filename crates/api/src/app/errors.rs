use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use contractkit_core::DomainError;
use contractkit_models::{ErrorDetail, ErrorResponse, FieldViolation};
use contractkit_parties::PersonServiceError;

/// A failure rendered as the contract's `ErrorResponse` envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
    details: Option<Vec<ErrorDetail>>,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            kind,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<ErrorDetail>) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFound", message)
    }

    /// 422: the request does not satisfy the contract.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "ValidationError", message)
    }

    /// 400: well-formed request rejected by a business rule.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "ValidationError", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "InternalError", message)
    }

    pub fn from_violations(violations: Vec<FieldViolation>) -> Self {
        Self::unprocessable("Request validation failed")
            .with_details(violations.into_iter().map(ErrorDetail::from).collect())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(kind = self.kind, message = %self.message, "request failed");
        }
        json_error(self.status, self.kind, self.message, self.details)
    }
}

/// Render the error envelope.
pub fn json_error(
    status: StatusCode,
    kind: &str,
    message: impl Into<String>,
    details: Option<Vec<ErrorDetail>>,
) -> Response {
    let body = ErrorResponse {
        error: kind.to_string(),
        message: message.into(),
        details,
        status_code: i32::from(status.as_u16()),
    };
    (status, Json(body)).into_response()
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::unprocessable(msg),
            DomainError::InvalidId(msg) => Self::not_found(msg),
        }
    }
}

impl From<PersonServiceError> for ApiError {
    /// Create-time mapping; the update route turns `DuplicateEmail` into a 400.
    fn from(err: PersonServiceError) -> Self {
        let message = err.to_string();
        match err {
            PersonServiceError::DuplicateEmail => {
                Self::new(StatusCode::CONFLICT, "DuplicateEmail", message)
            }
            PersonServiceError::Domain(e) => e.into(),
            PersonServiceError::Unavailable(msg) => Self::internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        let detail = ErrorDetail {
            field: missing_field(&text).map(str::to_string),
            message: text.clone(),
            code: Some(rejection_code(&rejection).to_string()),
        };
        Self::unprocessable("Request body is invalid").with_details(vec![detail])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let detail = ErrorDetail {
            field: None,
            message: rejection.body_text(),
            code: Some("invalid_query".to_string()),
        };
        Self::unprocessable("Query string is invalid").with_details(vec![detail])
    }
}

fn rejection_code(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "content_type",
        JsonRejection::JsonSyntaxError(_) => "json_syntax",
        JsonRejection::JsonDataError(_) => "json_data",
        _ => "body",
    }
}

/// Field name out of serde's "missing field `x`" message.
fn missing_field(text: &str) -> Option<&str> {
    let rest = text.split_once("missing field `")?.1;
    rest.split_once('`').map(|(field, _)| field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_email_is_a_conflict() {
        let err = ApiError::from(PersonServiceError::DuplicateEmail);
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.kind(), "DuplicateEmail");
        assert_eq!(err.message(), "Email already exists");
    }

    #[test]
    fn domain_validation_is_unprocessable() {
        let err = ApiError::from(PersonServiceError::Domain(DomainError::validation("bad")));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), "ValidationError");
    }

    #[test]
    fn extracts_missing_field_from_serde_message() {
        assert_eq!(
            missing_field("Failed to deserialize the JSON body into the target type: missing field `last_name` at line 1 column 20"),
            Some("last_name")
        );
        assert_eq!(missing_field("expected value at line 1 column 1"), None);
    }

    #[test]
    fn violations_become_details() {
        let err = ApiError::from_violations(vec![FieldViolation::new(
            "email",
            "value is not a valid email address",
            "email",
        )]);
        let details = err.details.as_ref().unwrap();
        assert_eq!(details[0].field.as_deref(), Some("email"));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
