//! # Edudesk Config
//!
//! Configuration types for the Edudesk client, loaded from environment variables:
//!
//! - [`api`]: REST API location, timeout, and retry policy
//! - [`session`]: Where the identity is persisted and who bypasses permission checks
//! - [`list`]: Page sizes and search debounce for list views
//!
//! # Example
//!
//! ```ignore
//! use edudesk_config::{ApiConfig, ListConfig, SessionConfig};
//!
//! let api = ApiConfig::from_env();
//! let session = SessionConfig::from_env();
//! let list = ListConfig::from_env();
//! ```

pub mod api;
pub mod list;
pub mod session;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use list::ListConfig;
pub use session::SessionConfig;
