//! Core data type definitions
//!
//! The session data model shared by the auth store, the access gate and the
//! portal API client.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, JobportError, JobportResult};

/// Portal role classification.
///
/// The wire format is the numeric `roleId` the backend stores
/// (1 = admin, 2 = employer, 3 = candidate), so the enum serializes as a
/// plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    /// Platform operator: manages employer accounts
    Admin,
    /// Job poster / recruiter
    Employer,
    /// Job seeker
    Candidate,
}

impl Role {
    /// Numeric identifier used by the backend
    pub fn role_id(&self) -> u8 {
        (*self).into()
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> u8 {
        match role {
            Role::Admin => 1,
            Role::Employer => 2,
            Role::Candidate => 3,
        }
    }
}

impl TryFrom<u8> for Role {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::Admin),
            2 => Ok(Role::Employer),
            3 => Ok(Role::Candidate),
            other => Err(format!("Unknown role id: {}", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Employer => write!(f, "employer"),
            Role::Candidate => write!(f, "candidate"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "employer" => Ok(Role::Employer),
            "candidate" => Ok(Role::Candidate),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// The authenticated user record as the backend serializes it
/// (`{userId, fullName, email, roleId}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Unique numeric identifier
    pub user_id: i64,
    /// Display name
    pub full_name: String,
    /// Login credential, unique per account
    pub email: String,
    /// Role classification
    #[serde(rename = "roleId", alias = "role")]
    pub role: Role,
}

impl UserAccount {
    /// A record is usable only when every identity field is populated
    pub fn is_complete(&self) -> bool {
        self.user_id > 0 && !self.full_name.is_empty() && !self.email.is_empty()
    }
}

/// The authenticated principal for the lifetime of one client session.
///
/// A `Session` is either fully present or entirely absent: construction
/// goes through [`Session::new`], which enforces that every field is
/// populated. It is never mutated in place; a new value replaces the old.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserAccount,
    /// Opaque bearer credential, never inspected by the client
    pub token: String,
}

impl Session {
    /// Build a session, rejecting partial records
    pub fn new(user: UserAccount, token: String) -> JobportResult<Self> {
        if token.trim().is_empty() {
            return Err(JobportError::Validation {
                message: "Session token must be a non-empty string".to_string(),
                field: Some("token".to_string()),
                context: ErrorContext::new("session"),
            });
        }
        if !user.is_complete() {
            return Err(JobportError::Validation {
                message: "User record is missing required identity fields".to_string(),
                field: Some("user".to_string()),
                context: ErrorContext::new("session"),
            });
        }
        Ok(Self { user, token })
    }

    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Session store lifecycle.
///
/// `Initializing` lasts from construction until `hydrate` resolves; the
/// access gate treats it as a distinct "pending" outcome so a returning
/// user with a valid persisted session is never bounced to login.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Hydration has not resolved yet
    Initializing,
    /// No valid session
    Anonymous,
    /// A fully validated session is active
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Initializing => write!(f, "initializing"),
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::Authenticated(session) => {
                write!(f, "authenticated({})", session.user.email)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(role: Role) -> UserAccount {
        UserAccount {
            user_id: 7,
            full_name: "Nguyen Van A".to_string(),
            email: "a@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn role_round_trips_through_role_id() {
        for role in [Role::Admin, Role::Employer, Role::Candidate] {
            assert_eq!(Role::try_from(role.role_id()).unwrap(), role);
        }
        assert!(Role::try_from(0u8).is_err());
        assert!(Role::try_from(4u8).is_err());
    }

    #[test]
    fn user_account_deserializes_backend_camel_case() {
        let json = r#"{"userId": 12, "fullName": "Tran B", "email": "b@example.com", "roleId": 2}"#;
        let user: UserAccount = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id, 12);
        assert_eq!(user.role, Role::Employer);
    }

    #[test]
    fn user_account_accepts_role_alias() {
        let json = r#"{"userId": 3, "fullName": "C", "email": "c@x.com", "role": 1}"#;
        let user: UserAccount = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn user_account_serializes_camel_case() {
        let value = serde_json::to_value(account(Role::Candidate)).unwrap();
        assert_eq!(value["userId"], 7);
        assert_eq!(value["fullName"], "Nguyen Van A");
        assert_eq!(value["roleId"], 3);
    }

    #[test]
    fn session_rejects_empty_token() {
        let err = Session::new(account(Role::Candidate), "  ".to_string()).unwrap_err();
        assert!(matches!(err, JobportError::Validation { .. }));
    }

    #[test]
    fn session_rejects_partial_user() {
        let mut user = account(Role::Candidate);
        user.email.clear();
        let err = Session::new(user, "tok".to_string()).unwrap_err();
        assert!(matches!(err, JobportError::Validation { .. }));
    }

    #[test]
    fn session_state_accessors() {
        let session = Session::new(account(Role::Admin), "tok".to_string()).unwrap();
        let state = SessionState::Authenticated(session.clone());
        assert!(state.is_authenticated());
        assert_eq!(state.session(), Some(&session));
        assert!(SessionState::Anonymous.session().is_none());
        assert!(!SessionState::Initializing.is_authenticated());
    }
}
