//! Router assembly and service wiring.
//!
//! - `routes/`: one module per tag in `api/openapi.yaml`, handlers only
//! - `extract.rs`: validating JSON body extractor
//! - `errors.rs`: the error envelope every failure is rendered as

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use contractkit_parties::{
    EchoPersonSummaryService, HealthService, InMemoryPersonService, PersonService,
    PersonSummaryService, StaticHealthService,
};

use crate::middleware;

pub mod errors;
pub mod extract;
pub mod routes;

/// Service implementations the handlers are wired to.
#[derive(Clone)]
pub struct AppServices {
    pub people: Arc<dyn PersonService>,
    pub health: Arc<dyn HealthService>,
    pub summaries: Arc<dyn PersonSummaryService>,
}

impl AppServices {
    /// Process-memory services; state is lost on restart.
    pub fn in_memory() -> Self {
        Self {
            people: Arc::new(InMemoryPersonService::new()),
            health: Arc::new(StaticHealthService),
            summaries: Arc::new(EchoPersonSummaryService),
        }
    }
}

/// Build the full HTTP router with every route under `prefix`.
///
/// An empty prefix mounts the routes at the root.
pub fn build_app(prefix: &str, services: AppServices) -> Router {
    let api = routes::router();
    let app = if prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(prefix, api)
    };

    app.fallback(routes::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(Extension(services.people))
                .layer(Extension(services.health))
                .layer(Extension(services.summaries)),
        )
}
