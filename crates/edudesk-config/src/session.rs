//! Session settings.
//!
//! The logged-in identity is kept as JSON in a single file; when the file is
//! missing the user is logged out. Two identities pass every permission check
//! regardless of their permission list:
//!
//! - any identity whose role equals `super_admin_role`
//! - the identity whose email equals `bypass_email`, compared ignoring case
//!
//! # Example
//!
//! ```
//! use edudesk_config::SessionConfig;
//! use edudesk_config::session::DEFAULT_SUPER_ADMIN_ROLE;
//!
//! let config = SessionConfig::default();
//! assert_eq!(config.super_admin_role, DEFAULT_SUPER_ADMIN_ROLE);
//! assert!(config.bypass_email.is_none());
//! assert!(config.session_path.ends_with("session.json"));
//! ```

use std::env;
use std::path::PathBuf;

/// Role that passes every permission check.
pub const DEFAULT_SUPER_ADMIN_ROLE: &str = "super_admin";

/// Session persistence and permission bypass settings.
///
/// # Environment Variables
///
/// - `EDUDESK_SESSION_PATH`: File holding the serialized identity
///   (default: `$HOME/.edudesk/session.json`)
/// - `EDUDESK_BYPASS_EMAIL`: Identity email that bypasses permission checks (default: none)
/// - `EDUDESK_SUPER_ADMIN_ROLE`: Role name that bypasses permission checks
///   (default: `super_admin`)
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub session_path: PathBuf,
    pub bypass_email: Option<String>,
    pub super_admin_role: String,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            session_path: env::var("EDUDESK_SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_path),
            bypass_email: env::var("EDUDESK_BYPASS_EMAIL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            super_admin_role: env::var("EDUDESK_SUPER_ADMIN_ROLE")
                .unwrap_or(defaults.super_admin_role),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let home = env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."));
        Self {
            session_path: home.join(".edudesk").join("session.json"),
            bypass_email: None,
            super_admin_role: DEFAULT_SUPER_ADMIN_ROLE.to_string(),
        }
    }
}
