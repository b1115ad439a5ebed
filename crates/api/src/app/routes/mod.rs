use axum::Router;

use crate::app::errors::ApiError;

pub mod people;
pub mod persons;
pub mod system;

/// Every API route, relative to the configured prefix.
pub fn router() -> Router {
    Router::new()
        .merge(system::router())
        .merge(people::router())
        .merge(persons::router())
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}
