//! Jobport Auth - Session lifecycle for the recruitment portal client
//!
//! This crate owns "who is logged in". It combines three pieces:
//!
//! - [`storage`]: the two persisted credential slots (bearer token and
//!   serialized user record) behind a trait so tests and alternative
//!   front ends can swap the backing store.
//! - [`api`]: the Auth API collaborator reached over HTTP, also behind a
//!   trait for the same reason.
//! - [`store`]: the [`SessionStore`] state machine
//!   (`Initializing -> Anonymous <-> Authenticated`) tying the two
//!   together. It is the single writer of the credential slots.
//!
//! Everything else in the application only reads session state through
//! [`SessionStore`]; route gating on top of it lives in `jobport-access`.

pub mod api;
pub mod storage;
pub mod store;

pub use api::{AuthBackend, HttpAuthBackend, LoginRequest, RegisterRequest};
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use store::SessionStore;
