//! Service configuration loaded from environment variables.
//!
//! Configuration is loaded once by the embedding process and validated
//! before any service instance is constructed.
//!
//! ## Variables
//!
//! - `BASE_URL` - Prefix for returned short URLs (default: `http://localhost:8080`)
//! - `ID_LENGTH` - Generated identifier length (default: 8)
//! - `ID_MAX_ATTEMPTS` - Allocator retry bound (default: 64)
//! - `DELETE_QUEUE_CAPACITY` - Deletion intake channel bound (default: 1024)
//! - `DELETE_BATCH_LIMIT` - Buffer size that triggers an immediate flush (default: 100)
//! - `DELETE_FLUSH_INTERVAL_SECS` - Timer-driven flush period (default: 5)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::Result;
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Prefix prepended to short identifiers in responses.
    pub base_url: String,
    /// Length of generated short identifiers.
    pub id_length: usize,
    /// Upper bound on allocator reservation attempts.
    pub id_max_attempts: u32,
    /// Capacity of the deletion intake channel.
    pub delete_queue_capacity: usize,
    /// Deletion buffer size that triggers an immediate flush.
    pub delete_batch_limit: usize,
    /// Period of the timer-driven deletion flush, in seconds.
    pub delete_flush_interval_secs: u64,
    /// Default log level when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log output format: `text` or `json`.
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables, applying defaults
    /// for anything unset.
    pub fn from_env() -> Self {
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());

        let id_length = env::var("ID_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8);

        let id_max_attempts = env::var("ID_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64);

        let delete_queue_capacity = env::var("DELETE_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1024);

        let delete_batch_limit = env::var("DELETE_BATCH_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let delete_flush_interval_secs = env::var("DELETE_FLUSH_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Self {
            base_url,
            id_length,
            id_max_attempts,
            delete_queue_capacity,
            delete_batch_limit,
            delete_flush_interval_secs,
            log_level,
            log_format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when a value is outside its allowed range or
    /// `BASE_URL` is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        match url::Url::parse(&self.base_url) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
            _ => anyhow::bail!(
                "BASE_URL must be an absolute http(s) URL, got '{}'",
                self.base_url
            ),
        }

        if !(4..=32).contains(&self.id_length) {
            anyhow::bail!("ID_LENGTH must be between 4 and 32, got {}", self.id_length);
        }

        if self.id_max_attempts == 0 {
            anyhow::bail!("ID_MAX_ATTEMPTS must be at least 1");
        }

        if self.delete_queue_capacity == 0 {
            anyhow::bail!("DELETE_QUEUE_CAPACITY must be at least 1");
        }

        if self.delete_batch_limit == 0 || self.delete_batch_limit > 10_000 {
            anyhow::bail!(
                "DELETE_BATCH_LIMIT must be between 1 and 10000, got {}",
                self.delete_batch_limit
            );
        }

        if self.delete_flush_interval_secs == 0 {
            anyhow::bail!("DELETE_FLUSH_INTERVAL_SECS must be greater than 0");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        Ok(())
    }

    /// Logs a configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  ID length: {}", self.id_length);
        tracing::info!("  Deletion queue capacity: {}", self.delete_queue_capacity);
        tracing::info!("  Deletion batch limit: {}", self.delete_batch_limit);
        tracing::info!(
            "  Deletion flush interval: {}s",
            self.delete_flush_interval_secs
        );
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}
