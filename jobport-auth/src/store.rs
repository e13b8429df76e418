//! Session store - the single source of truth for "who is logged in"
//!
//! Owns the in-memory [`Session`] and keeps it synchronized with the two
//! persisted credential slots and the Auth API. The lifecycle is a small
//! state machine: the store starts `Initializing`, `hydrate` resolves it
//! to `Anonymous` or `Authenticated`, and login/register/logout cycle
//! between those two for the life of the application.

use crate::api::{AuthBackend, RegisterRequest};
use crate::storage::CredentialStore;
use jobport_core::{JobportError, JobportResult, Role, Session, SessionState, UserAccount};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Single writer of session state and of the credential slots.
///
/// Cheap to share: clone the `Arc` it is usually held in. Reads are
/// synchronous; only `login` and `register` touch the network. When
/// overlapping calls race, the last one to resolve wins - persistence and
/// the in-memory swap happen under one lock so the two can never disagree.
pub struct SessionStore {
    backend: Arc<dyn AuthBackend>,
    storage: Arc<dyn CredentialStore>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Create a store in the `Initializing` state. Call [`hydrate`] before
    /// rendering anything protected.
    ///
    /// [`hydrate`]: SessionStore::hydrate
    pub fn new(backend: Arc<dyn AuthBackend>, storage: Arc<dyn CredentialStore>) -> Self {
        Self {
            backend,
            storage,
            state: RwLock::new(SessionState::Initializing),
        }
    }

    /// Restore a session from the persisted slots.
    ///
    /// Succeeds only if both slots are present, the token is non-empty and
    /// the user record parses into a complete identity. Anything else is
    /// treated as "not logged in", never as a reportable fault: both slots
    /// are cleared and the store resolves to `Anonymous`. Returns the
    /// resolved state.
    pub fn hydrate(&self) -> SessionState {
        let resolved = match self.read_persisted() {
            Ok(Some(session)) => {
                info!(user_id = session.user.user_id, role = %session.user.role,
                      "Restored persisted session");
                SessionState::Authenticated(session)
            }
            Ok(None) => {
                debug!("No persisted session found");
                SessionState::Anonymous
            }
            Err(err) => {
                // Corrupt data is recovered silently: clear and fall back
                err.log();
                if let Err(clear_err) = self.storage.clear() {
                    warn!(error = %clear_err, "Failed to clear corrupt credential slots");
                }
                SessionState::Anonymous
            }
        };

        let mut state = self.write_lock();
        *state = resolved.clone();
        resolved
    }

    /// Exchange credentials for a new session, replacing any current one
    pub async fn login(&self, email: &str, password: &str) -> JobportResult<Session> {
        debug!(email, "Logging in");
        let session = self.backend.login(email, password).await?;
        self.install(session)
    }

    /// Create an account and sign it in
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> JobportResult<Session> {
        debug!(email, %role, "Registering account");
        let session = self
            .backend
            .register(RegisterRequest {
                full_name: full_name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                role,
            })
            .await?;
        self.install(session)
    }

    /// Clear the session unconditionally.
    ///
    /// Never contacts the network, always succeeds, idempotent. A storage
    /// failure while clearing is logged; the in-memory state still drops
    /// to `Anonymous`.
    pub fn logout(&self) {
        let mut state = self.write_lock();
        if let Err(err) = self.storage.clear() {
            warn!(error = %err, "Failed to clear credential slots on logout");
        }
        if state.is_authenticated() {
            info!("Session cleared");
        }
        *state = SessionState::Anonymous;
    }

    /// Synchronous read of the current session; no side effects
    pub fn current_session(&self) -> Option<Session> {
        self.read_lock().session().cloned()
    }

    /// Snapshot of the full lifecycle state, including `Initializing`
    pub fn state(&self) -> SessionState {
        self.read_lock().clone()
    }

    /// Persist and install a freshly validated session. Both happen under
    /// the write lock so racing calls cannot interleave storage and memory.
    fn install(&self, session: Session) -> JobportResult<Session> {
        let user_json = serde_json::to_string(&session.user)?;

        let mut state = self.write_lock();
        self.storage.write(&session.token, &user_json)?;
        *state = SessionState::Authenticated(session.clone());

        info!(user_id = session.user.user_id, role = %session.user.role,
              "Session established");
        Ok(session)
    }

    /// Read and validate the persisted pair. `Ok(None)` means cleanly
    /// absent; `Err` means present but unusable.
    fn read_persisted(&self) -> JobportResult<Option<Session>> {
        let token = self.storage.read_token()?;
        let user_raw = self.storage.read_user()?;

        let (token, user_raw) = match (token, user_raw) {
            (Some(token), Some(user)) => (token, user),
            (None, None) => return Ok(None),
            // Half a session is never trusted
            _ => {
                return Err(JobportError::corrupt_session(
                    "Only one of the two credential slots is present",
                ))
            }
        };

        if token.trim().is_empty() {
            return Err(JobportError::corrupt_session("Persisted token is empty"));
        }

        // Observed in the wild: a serializer once wrote the literal strings
        // "undefined" and "null" into the user slot
        let trimmed = user_raw.trim();
        if trimmed.is_empty() || trimmed == "undefined" || trimmed == "null" {
            return Err(JobportError::corrupt_session(format!(
                "Persisted user record is the literal {:?}",
                trimmed
            )));
        }

        let value: serde_json::Value = serde_json::from_str(trimmed).map_err(|e| {
            JobportError::corrupt_session(format!("Persisted user record is not JSON: {}", e))
        })?;

        if !value.is_object() {
            return Err(JobportError::corrupt_session(
                "Persisted user record is not a JSON object",
            ));
        }

        let user: UserAccount = serde_json::from_value(value).map_err(|e| {
            JobportError::corrupt_session(format!(
                "Persisted user record failed validation: {}",
                e
            ))
        })?;

        let session = Session::new(user, token).map_err(|e| {
            JobportError::corrupt_session(format!("Persisted session is incomplete: {}", e))
        })?;

        Ok(Some(session))
    }

    fn read_lock(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCredentialStore;
    use async_trait::async_trait;

    /// Stub Auth API with a fixed outcome per call
    struct StubBackend {
        outcome: StubOutcome,
    }

    #[derive(Clone)]
    enum StubOutcome {
        Success(Session),
        Rejected(&'static str),
        Malformed,
        Transport,
    }

    impl StubBackend {
        fn new(outcome: StubOutcome) -> Arc<Self> {
            Arc::new(Self { outcome })
        }

        fn respond(&self) -> JobportResult<Session> {
            match &self.outcome {
                StubOutcome::Success(session) => Ok(session.clone()),
                StubOutcome::Rejected(message) => {
                    Err(JobportError::auth_rejected(*message, "stub"))
                }
                StubOutcome::Malformed => Err(JobportError::malformed("missing token", "stub")),
                StubOutcome::Transport => Err(JobportError::transport("unreachable", "stub")),
            }
        }
    }

    #[async_trait]
    impl AuthBackend for StubBackend {
        async fn login(&self, _email: &str, _password: &str) -> JobportResult<Session> {
            self.respond()
        }

        async fn register(&self, _request: RegisterRequest) -> JobportResult<Session> {
            self.respond()
        }
    }

    fn candidate_session() -> Session {
        let user = UserAccount {
            user_id: 42,
            full_name: "Ung Vien".to_string(),
            email: "uv@x.vn".to_string(),
            role: Role::Candidate,
        };
        Session::new(user, "jwt-42".to_string()).unwrap()
    }

    fn store_with(
        outcome: StubOutcome,
        storage: Arc<MemoryCredentialStore>,
    ) -> SessionStore {
        SessionStore::new(StubBackend::new(outcome), storage)
    }

    fn seeded(token: Option<&str>, user: Option<&str>) -> Arc<MemoryCredentialStore> {
        Arc::new(MemoryCredentialStore::seeded(token, user))
    }

    const VALID_USER: &str =
        r#"{"userId": 42, "fullName": "Ung Vien", "email": "uv@x.vn", "roleId": 3}"#;

    #[test]
    fn store_starts_initializing() {
        let store = store_with(StubOutcome::Transport, Arc::new(MemoryCredentialStore::new()));
        assert_eq!(store.state(), SessionState::Initializing);
        assert!(store.current_session().is_none());
    }

    #[test]
    fn hydrate_restores_valid_pair_exactly() {
        let storage = seeded(Some("jwt-42"), Some(VALID_USER));
        let store = store_with(StubOutcome::Transport, storage);

        let state = store.hydrate();
        assert_eq!(state, SessionState::Authenticated(candidate_session()));
        assert_eq!(store.current_session(), Some(candidate_session()));
    }

    #[test]
    fn hydrate_with_empty_slots_is_anonymous() {
        let store = store_with(StubOutcome::Transport, Arc::new(MemoryCredentialStore::new()));
        assert_eq!(store.hydrate(), SessionState::Anonymous);
    }

    #[test]
    fn hydrate_clears_corrupt_data() {
        let cases: &[(Option<&str>, Option<&str>)] = &[
            // missing token
            (None, Some(VALID_USER)),
            // missing user record
            (Some("jwt"), None),
            // empty token
            (Some("   "), Some(VALID_USER)),
            // literal "undefined" user record, observed in stored data
            (Some("abc"), Some("undefined")),
            // literal "null"
            (Some("abc"), Some("null")),
            // non-JSON
            (Some("abc"), Some("{not json")),
            // JSON but not an object
            (Some("abc"), Some("[1,2,3]")),
            (Some("abc"), Some("\"just a string\"")),
            // object missing identity fields
            (Some("abc"), Some(r#"{"userId": 1}"#)),
            // object with empty identity fields
            (
                Some("abc"),
                Some(r#"{"userId": 1, "fullName": "", "email": "", "roleId": 3}"#),
            ),
            // unknown role id
            (
                Some("abc"),
                Some(r#"{"userId": 1, "fullName": "A", "email": "a@x.vn", "roleId": 9}"#),
            ),
        ];

        for (token, user) in cases {
            let storage = seeded(*token, *user);
            let store = store_with(StubOutcome::Transport, storage.clone());

            assert_eq!(
                store.hydrate(),
                SessionState::Anonymous,
                "case token={:?} user={:?}",
                token,
                user
            );
            assert_eq!(storage.read_token().unwrap(), None, "token slot not cleared");
            assert_eq!(storage.read_user().unwrap(), None, "user slot not cleared");
        }
    }

    #[tokio::test]
    async fn login_persists_and_installs_session() {
        let storage = Arc::new(MemoryCredentialStore::new());
        let store = store_with(StubOutcome::Success(candidate_session()), storage.clone());
        store.hydrate();

        let session = store.login("uv@x.vn", "secret").await.unwrap();
        assert_eq!(session, candidate_session());
        assert_eq!(store.state(), SessionState::Authenticated(candidate_session()));
        assert_eq!(storage.read_token().unwrap().as_deref(), Some("jwt-42"));

        // The persisted record hydrates back to the identical session
        let rehydrated = store_with(StubOutcome::Transport, storage);
        assert_eq!(
            rehydrated.hydrate(),
            SessionState::Authenticated(candidate_session())
        );
    }

    #[tokio::test]
    async fn rejected_login_leaves_state_untouched() {
        let storage = seeded(Some("jwt-42"), Some(VALID_USER));
        let store = store_with(StubOutcome::Rejected("email exists"), storage.clone());
        store.hydrate();

        let err = store.login("uv@x.vn", "wrong").await.unwrap_err();
        match err {
            JobportError::AuthRejected { message, .. } => assert_eq!(message, "email exists"),
            other => panic!("expected AuthRejected, got {:?}", other),
        }

        // Session unchanged from before the call
        assert_eq!(store.state(), SessionState::Authenticated(candidate_session()));
        assert_eq!(storage.read_token().unwrap().as_deref(), Some("jwt-42"));
    }

    #[tokio::test]
    async fn malformed_and_transport_failures_do_not_clear_session() {
        for outcome in [StubOutcome::Malformed, StubOutcome::Transport] {
            let storage = seeded(Some("jwt-42"), Some(VALID_USER));
            let store = store_with(outcome, storage);
            store.hydrate();

            assert!(store.login("uv@x.vn", "pw").await.is_err());
            assert!(store.state().is_authenticated());
        }
    }

    #[tokio::test]
    async fn login_then_logout_returns_to_anonymous_with_cleared_slots() {
        let storage = Arc::new(MemoryCredentialStore::new());
        let store = store_with(StubOutcome::Success(candidate_session()), storage.clone());
        store.hydrate();

        store.login("uv@x.vn", "secret").await.unwrap();
        store.logout();

        assert_eq!(store.state(), SessionState::Anonymous);
        assert_eq!(storage.read_token().unwrap(), None);
        assert_eq!(storage.read_user().unwrap(), None);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let storage = Arc::new(MemoryCredentialStore::new());
        let store = store_with(StubOutcome::Success(candidate_session()), storage.clone());
        store.hydrate();
        store.login("uv@x.vn", "secret").await.unwrap();

        store.logout();
        let after_first = (store.state(), storage.read_token().unwrap());
        store.logout();
        let after_second = (store.state(), storage.read_token().unwrap());
        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn register_installs_session_like_login() {
        let storage = Arc::new(MemoryCredentialStore::new());
        let store = store_with(StubOutcome::Success(candidate_session()), storage.clone());
        store.hydrate();

        let session = store
            .register("Ung Vien", "uv@x.vn", "secret", Role::Candidate)
            .await
            .unwrap();
        assert_eq!(session.user.role, Role::Candidate);
        assert!(store.state().is_authenticated());
        assert!(storage.read_user().unwrap().is_some());
    }
}
