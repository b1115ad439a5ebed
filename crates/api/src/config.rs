//! Process configuration from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

use contractkit_observability::LogFormat;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `CONTRACTKIT_BIND`
    pub bind: SocketAddr,
    /// `CONTRACTKIT_API_PREFIX`; every route is nested under it.
    pub api_prefix: String,
    /// `CONTRACTKIT_SEED`
    pub seed: bool,
    /// `CONTRACTKIT_LOG_FORMAT`
    pub log_format: LogFormat,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            seed: false,
            log_format: LogFormat::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset or blank means default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("CONTRACTKIT_BIND") {
            config.bind = raw
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("CONTRACTKIT_BIND", &raw, format!("{e}")))?;
        }

        if let Some(raw) = get("CONTRACTKIT_API_PREFIX") {
            let prefix = raw.trim().trim_end_matches('/');
            if !raw.trim().starts_with('/') {
                return Err(ConfigError::invalid(
                    "CONTRACTKIT_API_PREFIX",
                    &raw,
                    "must start with '/'",
                ));
            }
            // "/" alone means no prefix.
            config.api_prefix = prefix.to_string();
        }

        if let Some(raw) = get("CONTRACTKIT_SEED") {
            config.seed = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::invalid(
                        "CONTRACTKIT_SEED",
                        &raw,
                        "expected true or false",
                    ));
                }
            };
        }

        if let Some(raw) = get("CONTRACTKIT_LOG_FORMAT") {
            config.log_format = raw
                .parse()
                .map_err(|e| ConfigError::invalid("CONTRACTKIT_LOG_FORMAT", &raw, format!("{e}")))?;
        }

        Ok(config)
    }
}
