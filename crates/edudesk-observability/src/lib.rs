//! # Edudesk Observability
//!
//! `tracing` subscriber setup for Edudesk binaries.
//!
//! Console output is compact and goes to stderr so it never mixes with command
//! output. When `LOG_DIR` is set, structured JSON logs are also written to a
//! daily-rotated file in that directory.
//!
//! # Examples
//!
//! ```no_run
//! use edudesk_observability::{LoggingConfig, init_logging};
//!
//! init_logging(&LoggingConfig::from_env()).ok();
//! tracing::info!("ready");
//! ```

pub mod logging;

pub use logging::{LoggingConfig, init_logging};
