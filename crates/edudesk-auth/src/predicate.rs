//! The permission predicate.
//!
//! Pure and cheap: it is evaluated on every render of every gated control.

use edudesk_config::SessionConfig;
use edudesk_config::session::DEFAULT_SUPER_ADMIN_ROLE;
use edudesk_core::permissions;

use crate::identity::Identity;

/// Decides whether an identity may perform a named action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionPolicy {
    /// Identity email that passes every check.
    pub bypass_email: Option<String>,
    /// Role name that passes every check.
    pub super_admin_role: String,
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self {
            bypass_email: None,
            super_admin_role: DEFAULT_SUPER_ADMIN_ROLE.to_string(),
        }
    }
}

impl From<&SessionConfig> for PermissionPolicy {
    fn from(config: &SessionConfig) -> Self {
        Self {
            bypass_email: config.bypass_email.clone(),
            super_admin_role: config.super_admin_role.clone(),
        }
    }
}

impl PermissionPolicy {
    /// Whether the identity bypasses permission checks entirely.
    pub fn is_unrestricted(&self, identity: &Identity) -> bool {
        let bypass = self
            .bypass_email
            .as_deref()
            .is_some_and(|email| email.eq_ignore_ascii_case(identity.email.trim()));
        bypass || identity.role == self.super_admin_role
    }

    /// Check `token` against the identity. Fails closed when there is no identity.
    ///
    /// The token is compared case-insensitively against the identity's
    /// comma-split, trimmed permission string; the token `all` grants
    /// everything.
    pub fn allows(&self, identity: Option<&Identity>, token: &str) -> bool {
        let Some(identity) = identity else {
            return false;
        };

        if self.is_unrestricted(identity) {
            return true;
        }

        let Some(perms) = identity.role_perms.as_deref() else {
            return false;
        };

        let required = token.trim().to_lowercase();
        if required.is_empty() {
            return false;
        }

        permissions::parse_tokens(perms)
            .iter()
            .any(|t| *t == required || t == permissions::ALL)
    }
}
