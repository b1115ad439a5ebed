use async_trait::async_trait;

use contractkit_models::HealthStatus;

/// Liveness check backing `GET /health`.
#[async_trait]
pub trait HealthService: Send + Sync {
    async fn check_health(&self) -> HealthStatus;
}

/// Always healthy while the process can answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticHealthService;

#[async_trait]
impl HealthService for StaticHealthService {
    async fn check_health(&self) -> HealthStatus {
        HealthStatus::ok()
    }
}
