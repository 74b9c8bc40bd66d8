//! Server configuration

use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub log_level: String,
    /// Mutation engine tuning
    pub engine: EngineConfig,
}

/// Mutation engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Extra attempts after a `ConcurrencyConflict` before giving up
    pub max_retries: u32,
    /// Backoff between attempts, multiplied by the attempt number
    pub retry_backoff_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_backoff_ms: 10,
        }
    }
}

impl EngineConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_retries = std::env::var("SQLITETREE_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_retries);

        let retry_backoff_ms = std::env::var("SQLITETREE_RETRY_BACKOFF_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.retry_backoff_ms);

        Self {
            max_retries,
            retry_backoff_ms,
        }
    }

    /// Total number of attempts, the first one included
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Sleep before the attempt following `attempt`
    pub fn backoff(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(u64::from(attempt)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_path: "./tree.db".to_string(),
            log_level: "info".to_string(),
            engine: EngineConfig::default(),
        }
    }
}

impl Config {
    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
