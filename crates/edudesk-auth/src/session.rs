//! Persisted session store.
//!
//! The identity is written only at login and logout and read by everything
//! else. Parsing and validation of the stored record happen here, once per
//! read; a missing or corrupt record reads as "logged out".

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use edudesk_config::SessionConfig;
use edudesk_core::{ClientError, ClientResult};
use tracing::{debug, warn};

use crate::identity::Identity;
use crate::predicate::PermissionPolicy;

/// Backend holding the serialized identity under a single key.
pub trait SessionStorage: Send + Sync {
    /// Raw stored record, `None` when absent.
    fn load(&self) -> ClientResult<Option<String>>;
    fn save(&self, raw: &str) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// Stores the identity as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> ClientResult<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ClientError::Storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&self, raw: &str) -> ClientResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                ClientError::Storage(format!("failed to create {}: {e}", dir.display()))
            })?;
        }
        fs::write(&self.path, raw).map_err(|e| {
            ClientError::Storage(format!("failed to write {}: {e}", self.path.display()))
        })
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(format!(
                "failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// In-process storage, used by tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    raw: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with a raw record, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> ClientResult<Option<String>> {
        let guard = self
            .raw
            .lock()
            .map_err(|_| ClientError::Storage("session lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, raw: &str) -> ClientResult<()> {
        let mut guard = self
            .raw
            .lock()
            .map_err(|_| ClientError::Storage("session lock poisoned".to_string()))?;
        *guard = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        let mut guard = self
            .raw
            .lock()
            .map_err(|_| ClientError::Storage("session lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Read-mostly session context shared by every component.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    policy: PermissionPolicy,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>, policy: PermissionPolicy) -> Self {
        Self { storage, policy }
    }

    /// File-backed store at the configured session path.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            Arc::new(FileStorage::new(config.session_path.clone())),
            PermissionPolicy::from(config),
        )
    }

    /// Empty in-memory store with the default policy.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), PermissionPolicy::default())
    }

    pub fn policy(&self) -> &PermissionPolicy {
        &self.policy
    }

    /// The stored identity, or `None` when logged out or the record is unreadable.
    pub fn current_identity(&self) -> Option<Identity> {
        let raw = match self.storage.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read session; treating as logged out");
                return None;
            }
        };

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(error = %e, "Corrupt session record; treating as logged out");
                None
            }
        }
    }

    /// Replace the stored identity (login).
    pub fn set_identity(&self, identity: &Identity) -> ClientResult<()> {
        let raw = serde_json::to_string(identity)?;
        self.storage.save(&raw)?;
        debug!(user_id = identity.id, role = %identity.role, "Session stored");
        Ok(())
    }

    /// Remove the stored identity (logout).
    pub fn clear_identity(&self) -> ClientResult<()> {
        self.storage.clear()?;
        debug!("Session cleared");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_identity().is_some()
    }

    /// Whether the current identity may perform `token`.
    pub fn has_permission(&self, token: &str) -> bool {
        self.policy.allows(self.current_identity().as_ref(), token)
    }

    /// The current identity if it may perform `token`.
    pub fn require(&self, token: &str) -> ClientResult<Identity> {
        let identity = self.current_identity().ok_or(ClientError::Unauthenticated)?;
        if self.policy.allows(Some(&identity), token) {
            Ok(identity)
        } else {
            Err(ClientError::Unauthorized(token.to_string()))
        }
    }

    /// Branch every list request is scoped to, if any.
    ///
    /// Unrestricted identities see all branches.
    pub fn branch_scope(&self) -> Option<i64> {
        let identity = self.current_identity()?;
        if self.policy.is_unrestricted(&identity) {
            None
        } else {
            identity.branch_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff() -> Identity {
        Identity {
            id: 5,
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            role: "staff".to_string(),
            branch_id: Some(3),
            role_perms: Some("view lead, add lead".to_string()),
        }
    }

    #[test]
    fn test_empty_store_is_logged_out() {
        let session = SessionStore::in_memory();
        assert!(session.current_identity().is_none());
        assert!(!session.has_permission("view lead"));
        assert!(matches!(
            session.require("view lead"),
            Err(ClientError::Unauthenticated)
        ));
    }

    #[test]
    fn test_set_and_clear_identity() {
        let session = SessionStore::in_memory();
        session.set_identity(&staff()).unwrap();
        assert_eq!(session.current_identity(), Some(staff()));
        assert!(session.has_permission("add lead"));
        assert!(!session.has_permission("delete lead"));

        session.clear_identity().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_corrupt_record_reads_as_logged_out() {
        let session = SessionStore::new(
            Arc::new(MemoryStorage::with_raw("{not json")),
            PermissionPolicy::default(),
        );
        assert!(session.current_identity().is_none());
        assert!(!session.has_permission("view lead"));
    }

    #[test]
    fn test_require_unauthorized() {
        let session = SessionStore::in_memory();
        session.set_identity(&staff()).unwrap();
        assert!(matches!(
            session.require("delete lead"),
            Err(ClientError::Unauthorized(ref t)) if t == "delete lead"
        ));
        assert!(session.require("view lead").is_ok());
    }

    #[test]
    fn test_branch_scope() {
        let session = SessionStore::in_memory();
        session.set_identity(&staff()).unwrap();
        assert_eq!(session.branch_scope(), Some(3));

        let mut admin = staff();
        admin.role = "super_admin".to_string();
        session.set_identity(&admin).unwrap();
        assert_eq!(session.branch_scope(), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("session.json"));
        let session = SessionStore::new(Arc::new(storage.clone()), PermissionPolicy::default());

        assert!(session.current_identity().is_none());
        session.set_identity(&staff()).unwrap();
        assert!(storage.path().exists());
        assert_eq!(session.current_identity(), Some(staff()));

        session.clear_identity().unwrap();
        assert!(!storage.path().exists());
        session.clear_identity().unwrap();
    }
}
