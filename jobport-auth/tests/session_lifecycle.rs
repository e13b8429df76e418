//! End-to-end session lifecycle against file-backed credential storage

use async_trait::async_trait;
use jobport_auth::{AuthBackend, FileCredentialStore, RegisterRequest, SessionStore};
use jobport_core::{JobportResult, Role, Session, SessionState, UserAccount};
use std::sync::Arc;

struct FixedBackend {
    session: Session,
}

#[async_trait]
impl AuthBackend for FixedBackend {
    async fn login(&self, _email: &str, _password: &str) -> JobportResult<Session> {
        Ok(self.session.clone())
    }

    async fn register(&self, _request: RegisterRequest) -> JobportResult<Session> {
        Ok(self.session.clone())
    }
}

fn employer_session() -> Session {
    let user = UserAccount {
        user_id: 7,
        full_name: "Cong Ty TNHH ABC".to_string(),
        email: "hr@abc.vn".to_string(),
        role: Role::Employer,
    };
    Session::new(user, "jwt-employer".to_string()).unwrap()
}

#[tokio::test]
async fn session_survives_restart_through_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FixedBackend {
        session: employer_session(),
    });

    // First "application run": log in
    {
        let storage = Arc::new(FileCredentialStore::new(dir.path()).unwrap());
        let store = SessionStore::new(backend.clone(), storage);
        assert_eq!(store.hydrate(), SessionState::Anonymous);
        store.login("hr@abc.vn", "secret").await.unwrap();
    }

    // Second run: hydration alone restores the identical session
    {
        let storage = Arc::new(FileCredentialStore::new(dir.path()).unwrap());
        let store = SessionStore::new(backend.clone(), storage);
        let state = store.hydrate();
        assert_eq!(state, SessionState::Authenticated(employer_session()));
    }
}

#[tokio::test]
async fn logout_clears_files_so_restart_is_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FixedBackend {
        session: employer_session(),
    });

    {
        let storage = Arc::new(FileCredentialStore::new(dir.path()).unwrap());
        let store = SessionStore::new(backend.clone(), storage);
        store.hydrate();
        store.login("hr@abc.vn", "secret").await.unwrap();
        store.logout();
    }

    {
        let storage = Arc::new(FileCredentialStore::new(dir.path()).unwrap());
        let store = SessionStore::new(backend, storage);
        assert_eq!(store.hydrate(), SessionState::Anonymous);
    }
}

#[tokio::test]
async fn corrupt_user_file_is_discarded_on_restart() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FixedBackend {
        session: employer_session(),
    });

    std::fs::write(dir.path().join("token"), "jwt-employer").unwrap();
    std::fs::write(dir.path().join("user.json"), "undefined").unwrap();

    let storage = Arc::new(FileCredentialStore::new(dir.path()).unwrap());
    let store = SessionStore::new(backend, storage.clone());
    assert_eq!(store.hydrate(), SessionState::Anonymous);

    use jobport_auth::CredentialStore;
    assert_eq!(storage.read_token().unwrap(), None);
    assert_eq!(storage.read_user().unwrap(), None);
}
