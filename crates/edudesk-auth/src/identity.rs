//! The locally cached representation of the logged-in user.

use edudesk_core::multi_value::MultiValue;
use edudesk_core::permissions;
use edudesk_core::serde::deserialize_optional_i64;
use serde::{Deserialize, Deserializer, Serialize};

/// The logged-in user as returned by the login endpoint.
///
/// Created at login, persisted for the session, removed at logout. It is never
/// mutated in place; a new login replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Role name, e.g. `super_admin` or `staff`.
    pub role: String,
    /// Branch the user is scoped to; `None` means all branches.
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub branch_id: Option<i64>,
    /// Delimited permission tokens, e.g. `"view lead, edit course"`.
    #[serde(default, deserialize_with = "deserialize_role_perms")]
    pub role_perms: Option<String>,
}

impl Identity {
    /// Lowercased permission tokens, empty when none are stored.
    pub fn permission_tokens(&self) -> Vec<String> {
        self.role_perms
            .as_deref()
            .map(permissions::parse_tokens)
            .unwrap_or_default()
    }
}

/// Some deployments send `role_perms` as a JSON array; normalize to the
/// delimited string.
fn deserialize_role_perms<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<MultiValue> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|v| !v.is_empty()).map(|v| v.to_wire()))
}
