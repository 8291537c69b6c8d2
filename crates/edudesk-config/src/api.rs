//! REST API connection settings.
//!
//! Every request goes to `base_url` joined with a resource path such as
//! `courses/3/`. Requests that take longer than the timeout fail with a
//! retryable error. Only GETs are retried, with the delay doubling after each
//! attempt:
//!
//! | Attempt | Delay before it (defaults) |
//! |---|---|
//! | 1 | none |
//! | 2 | 250 ms |
//! | 3 | 500 ms |
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use edudesk_config::ApiConfig;
//!
//! let config = ApiConfig::with_base_url("https://office.example.com/api");
//! assert_eq!(config.timeout(), Duration::from_secs(20));
//! assert_eq!(config.retry_backoff(), Duration::from_millis(250));
//! ```

use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Remote API settings.
///
/// # Environment Variables
///
/// - `EDUDESK_API_URL`: Base URL of the REST API (default: `http://localhost:8000/api`)
/// - `EDUDESK_TIMEOUT_SECS`: Per-request timeout, clamped to 1..=120 (default: `20`)
/// - `EDUDESK_RETRY_ATTEMPTS`: Extra attempts for idempotent GETs (default: `2`)
/// - `EDUDESK_RETRY_BACKOFF_MS`: First retry delay, doubled each attempt (default: `250`)
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("EDUDESK_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            timeout_secs: env::var("EDUDESK_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(defaults.timeout_secs)
                .clamp(1, 120),
            retry_attempts: env::var("EDUDESK_RETRY_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.retry_attempts),
            retry_backoff_ms: env::var("EDUDESK_RETRY_BACKOFF_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.retry_backoff_ms),
        }
    }

    /// Config pointing at `base_url` with default timeout and retries.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 20,
            retry_attempts: 2,
            retry_backoff_ms: 250,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = ApiConfig::with_base_url("http://127.0.0.1:9000/api/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_default_backoff() {
        assert_eq!(ApiConfig::default().retry_backoff(), Duration::from_millis(250));
    }
}
