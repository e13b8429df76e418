//! Jobport Access - role-based view gating
//!
//! One pure decision function, [`authorize`], evaluated on every
//! navigation, plus the declarative [`RoutePolicy`]/[`RouteTable`]
//! configuration it consumes. The [`AccessGate`] wrapper binds the
//! decision function to a shared `SessionStore` so every protected view
//! goes through the same gate instead of re-implementing role checks.

pub mod gate;
pub mod policy;

pub use gate::{authorize, AccessDecision, AccessGate};
pub use policy::{RoutePolicy, RouteTable};
