//! The access gate - one authorization decision point for every view
//!
//! [`authorize`] is a pure, synchronous function over the session state
//! and a route's declared policy. It holds no memory of previous
//! decisions; the caller re-evaluates it on every navigation.

use crate::policy::{RoutePolicy, RouteTable};
use jobport_auth::SessionStore;
use jobport_core::SessionState;
use std::sync::Arc;
use tracing::debug;

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the requested view
    Allow,
    /// Hydration has not resolved; render a neutral loading indication and
    /// re-evaluate once the store settles. Never bounce to login here.
    Pending,
    /// No session; send the user to the login entry point
    RedirectToLogin,
    /// Authenticated but the role is not admitted. Rendered as a
    /// not-found view rather than a redirect so role-gated routes do not
    /// reveal their existence.
    Forbidden,
}

impl std::fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessDecision::Allow => write!(f, "allow"),
            AccessDecision::Pending => write!(f, "pending"),
            AccessDecision::RedirectToLogin => write!(f, "redirect-to-login"),
            AccessDecision::Forbidden => write!(f, "forbidden"),
        }
    }
}

/// Decide whether the current session may render a view with `policy`
pub fn authorize(state: &SessionState, policy: &RoutePolicy) -> AccessDecision {
    match state {
        SessionState::Initializing => AccessDecision::Pending,
        SessionState::Anonymous => AccessDecision::RedirectToLogin,
        SessionState::Authenticated(session) => {
            if policy.admits(session.role()) {
                AccessDecision::Allow
            } else {
                AccessDecision::Forbidden
            }
        }
    }
}

/// Binds the decision function to a shared session store and a route table
/// so callers gate by path instead of repeating policy lookups.
pub struct AccessGate {
    store: Arc<SessionStore>,
    routes: RouteTable,
}

impl AccessGate {
    pub fn new(store: Arc<SessionStore>, routes: RouteTable) -> Self {
        Self { store, routes }
    }

    /// Gate with the portal's default route map
    pub fn with_portal_defaults(store: Arc<SessionStore>) -> Self {
        Self::new(store, RouteTable::portal_defaults())
    }

    /// Authorize a navigation to `path`. Paths not in the table are public.
    pub fn authorize_route(&self, path: &str) -> AccessDecision {
        let decision = match self.routes.policy(path) {
            Some(policy) => authorize(&self.store.state(), policy),
            None => AccessDecision::Allow,
        };
        debug!(path, %decision, "Route authorization evaluated");
        decision
    }

    /// Authorize against an ad-hoc policy, for views composed outside the
    /// static route table
    pub fn authorize_policy(&self, policy: &RoutePolicy) -> AccessDecision {
        authorize(&self.store.state(), policy)
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}
