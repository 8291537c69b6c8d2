//! Logging configuration and subscriber setup.
//!
//! Filtering is decided once, at startup:
//!
//! 1. `RUST_LOG`, when set, is used as the full filter directive.
//! 2. Otherwise every Edudesk crate logs at `LOG_LEVEL` and the HTTP stack
//!    (`reqwest`, `hyper`, `h2`) at `warn`.
//!
//! Console output is compact and goes to stderr. With `LOG_DIR` set, the same
//! events are also written as JSON lines to `edudesk.json.<date>` in that
//! directory, rotated daily.
//!
//! # Example
//!
//! ```
//! use edudesk_observability::LoggingConfig;
//!
//! let config = LoggingConfig {
//!     level: "debug".to_string(),
//!     log_dir: None,
//! };
//! assert!(config.directive().contains("edudesk_auth=debug"));
//! assert!(config.directive().contains("reqwest=warn"));
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose logs are filtered by the configured level.
const OWN_CRATES: &[&str] = &[
    "edudesk",
    "edudesk_cli",
    "edudesk_auth",
    "edudesk_config",
    "edudesk_core",
    "edudesk_models",
    "edudesk_observability",
];

/// Logging settings.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Full filter directive, overrides everything else
/// - `LOG_LEVEL`: Level for Edudesk crates (default: `info`)
/// - `LOG_DIR`: Directory for daily-rotated JSON logs (default: unset, no file output)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_dir: env::var("LOG_DIR")
                .ok()
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn directive(&self) -> String {
        let mut parts: Vec<String> = OWN_CRATES
            .iter()
            .map(|krate| format!("{krate}={}", self.level))
            .collect();
        parts.push("reqwest=warn,hyper=warn,hyper_util=warn,h2=warn".to_string());
        parts.join(",")
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directive()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
        }
    }
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed. If the log directory cannot be
/// created, file output is skipped and console logging still starts.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TryInitError> {
    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(config.env_filter());

    let json_layer = config.log_dir.as_ref().and_then(|dir| {
        if let Err(e) = fs::create_dir_all(dir) {
            eprintln!("Failed to create log directory {}: {e}", dir.display());
            return None;
        }
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, "edudesk.json");
        Some(
            fmt::layer()
                .json()
                .with_writer(appender)
                .with_current_span(true)
                .with_span_list(true)
                .with_ansi(false)
                .with_filter(config.env_filter()),
        )
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init()
}
