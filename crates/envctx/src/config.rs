use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name reported by the service (default: "envctx")
    pub service_name: String,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Whether to issue tokens to the demo users at startup (default: true)
    pub seed_demo_users: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SERVICE_NAME` - Service name (default: "envctx")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout in seconds (default: 10)
    /// - `SEED_DEMO_USERS` - Seed demo users, `true`/`1` or `false`/`0` (default: true)
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| "envctx".to_string()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            seed_demo_users: env::var("SEED_DEMO_USERS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
