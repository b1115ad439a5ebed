use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use contractkit_models::Validate;

use crate::app::errors::ApiError;

/// JSON body that both deserialized and passed its generated `Validate`
/// checks. Any failure is a 422 before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        let violations = value.validate();
        if !violations.is_empty() {
            return Err(ApiError::from_violations(violations));
        }
        Ok(Self(value))
    }
}
