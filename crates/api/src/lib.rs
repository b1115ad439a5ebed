//! HTTP API: routing, request validation, and error mapping over the
//! generated contract models and the hand-written services.

pub mod app;
pub mod config;
pub mod middleware;

pub use app::{AppServices, build_app};
pub use config::{ApiConfig, ConfigError};
