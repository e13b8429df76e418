//! Credential storage - the persisted half of the session
//!
//! Two string-valued slots, "auth token" and "serialized user record",
//! written and cleared together. The session store is the only writer;
//! nothing else in the workspace touches these paths.

use jobport_core::{JobportError, JobportResult};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

/// Abstraction over the two persisted credential slots.
///
/// Reads return `None` for an absent slot; only IO-level failures become
/// errors. Interpreting slot contents (corrupt JSON, literal `"undefined"`)
/// is the session store's job, not the storage layer's.
pub trait CredentialStore: Send + Sync {
    /// Read the persisted bearer token, if any
    fn read_token(&self) -> JobportResult<Option<String>>;

    /// Read the persisted serialized user record, if any
    fn read_user(&self) -> JobportResult<Option<String>>;

    /// Persist both slots together
    fn write(&self, token: &str, user_json: &str) -> JobportResult<()>;

    /// Remove both slots; succeeds when they are already absent
    fn clear(&self) -> JobportResult<()>;
}

/// File-backed credential store: one file per slot under a private directory
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> JobportResult<Self> {
        let dir = dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&dir).map_err(|e| {
            JobportError::storage(
                format!("Failed to create credential directory {}: {}", dir.display(), e),
                Some(Box::new(e)),
            )
        })?;

        info!("Credential store initialized at: {}", dir.display());

        Ok(Self { dir })
    }

    fn read_slot(&self, file: &str) -> JobportResult<Option<String>> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            JobportError::storage(
                format!("Failed to read {}: {}", path.display(), e),
                Some(Box::new(e)),
            )
        })?;

        Ok(Some(content))
    }

    fn remove_slot(&self, file: &str) -> JobportResult<()> {
        let path = self.dir.join(file);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                JobportError::storage(
                    format!("Failed to remove {}: {}", path.display(), e),
                    Some(Box::new(e)),
                )
            })?;
            debug!("Removed credential slot: {}", path.display());
        }
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn read_token(&self) -> JobportResult<Option<String>> {
        self.read_slot(TOKEN_FILE)
    }

    fn read_user(&self) -> JobportResult<Option<String>> {
        self.read_slot(USER_FILE)
    }

    fn write(&self, token: &str, user_json: &str) -> JobportResult<()> {
        let token_path = self.dir.join(TOKEN_FILE);
        let user_path = self.dir.join(USER_FILE);

        std::fs::write(&token_path, token).map_err(|e| {
            JobportError::storage(
                format!("Failed to write {}: {}", token_path.display(), e),
                Some(Box::new(e)),
            )
        })?;

        std::fs::write(&user_path, user_json).map_err(|e| {
            JobportError::storage(
                format!("Failed to write {}: {}", user_path.display(), e),
                Some(Box::new(e)),
            )
        })?;

        debug!("Persisted credential slots under {}", self.dir.display());
        Ok(())
    }

    fn clear(&self) -> JobportResult<()> {
        self.remove_slot(TOKEN_FILE)?;
        self.remove_slot(USER_FILE)?;
        Ok(())
    }
}

/// In-memory credential store for tests and throwaway sessions
#[derive(Default)]
pub struct MemoryCredentialStore {
    slots: Mutex<MemorySlots>,
}

#[derive(Default)]
struct MemorySlots {
    token: Option<String>,
    user: Option<String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the slots, e.g. to simulate a previous browser session
    pub fn seeded(token: Option<&str>, user: Option<&str>) -> Self {
        Self {
            slots: Mutex::new(MemorySlots {
                token: token.map(str::to_string),
                user: user.map(str::to_string),
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySlots> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn read_token(&self) -> JobportResult<Option<String>> {
        Ok(self.lock().token.clone())
    }

    fn read_user(&self) -> JobportResult<Option<String>> {
        Ok(self.lock().user.clone())
    }

    fn write(&self, token: &str, user_json: &str) -> JobportResult<()> {
        let mut slots = self.lock();
        slots.token = Some(token.to_string());
        slots.user = Some(user_json.to_string());
        Ok(())
    }

    fn clear(&self) -> JobportResult<()> {
        let mut slots = self.lock();
        slots.token = None;
        slots.user = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_both_slots() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("creds")).unwrap();

        assert_eq!(store.read_token().unwrap(), None);
        assert_eq!(store.read_user().unwrap(), None);

        store.write("jwt-abc", r#"{"userId":1}"#).unwrap();
        assert_eq!(store.read_token().unwrap().as_deref(), Some("jwt-abc"));
        assert_eq!(store.read_user().unwrap().as_deref(), Some(r#"{"userId":1}"#));
    }

    #[test]
    fn file_store_clear_removes_both_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path()).unwrap();

        store.write("jwt", "{}").unwrap();
        store.clear().unwrap();
        assert_eq!(store.read_token().unwrap(), None);
        assert_eq!(store.read_user().unwrap(), None);

        // Clearing an already-empty store succeeds
        store.clear().unwrap();
    }

    #[test]
    fn memory_store_seeding() {
        let store = MemoryCredentialStore::seeded(Some("abc"), Some("undefined"));
        assert_eq!(store.read_token().unwrap().as_deref(), Some("abc"));
        assert_eq!(store.read_user().unwrap().as_deref(), Some("undefined"));
        store.clear().unwrap();
        assert_eq!(store.read_token().unwrap(), None);
    }
}
