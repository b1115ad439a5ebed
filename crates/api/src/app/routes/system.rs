use std::sync::Arc;

use axum::{Extension, Json, Router, routing::get};

use contractkit_models::HealthStatus;
use contractkit_parties::HealthService;

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/", get(health))
}

pub async fn health(Extension(health): Extension<Arc<dyn HealthService>>) -> Json<HealthStatus> {
    Json(health.check_health().await)
}
