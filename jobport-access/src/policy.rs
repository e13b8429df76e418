//! Declarative route authorization policies
//!
//! A policy is just the set of roles a view admits; an empty set means any
//! authenticated session qualifies. Policies carry no state and are
//! recomputed from static configuration on every navigation.

use jobport_core::Role;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Authorization requirement attached to one navigable view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePolicy {
    /// Roles permitted to view this route; empty means "any authenticated"
    required_roles: HashSet<Role>,
}

impl RoutePolicy {
    /// Any authenticated session suffices
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// Only the listed roles may view the route
    pub fn roles<I: IntoIterator<Item = Role>>(roles: I) -> Self {
        Self {
            required_roles: roles.into_iter().collect(),
        }
    }

    /// Whether a session holding `role` satisfies this policy
    pub fn admits(&self, role: Role) -> bool {
        self.required_roles.is_empty() || self.required_roles.contains(&role)
    }

    pub fn required_roles(&self) -> &HashSet<Role> {
        &self.required_roles
    }
}

/// Static map from route path to policy.
///
/// Paths absent from the table are public; `policy()` returning `None`
/// means the view renders without consulting the session at all.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, RoutePolicy>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style route registration
    pub fn with_route<S: Into<String>>(mut self, path: S, policy: RoutePolicy) -> Self {
        self.routes.insert(path.into(), policy);
        self
    }

    /// Look up the policy for a path; `None` means the route is public
    pub fn policy(&self, path: &str) -> Option<&RoutePolicy> {
        self.routes.get(path)
    }

    /// Iterate registered protected routes
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoutePolicy)> {
        self.routes.iter().map(|(path, policy)| (path.as_str(), policy))
    }

    /// The portal's navigable views and their role requirements.
    ///
    /// Landing, login and register are public and intentionally absent.
    pub fn portal_defaults() -> Self {
        use Role::*;

        Self::new()
            // Common
            .with_route("/dashboard", RoutePolicy::authenticated())
            .with_route("/jobs/:id", RoutePolicy::authenticated())
            // Candidate
            .with_route("/jobs", RoutePolicy::roles([Candidate]))
            .with_route("/profile", RoutePolicy::roles([Candidate]))
            .with_route("/applications", RoutePolicy::roles([Candidate]))
            .with_route("/notifications", RoutePolicy::roles([Candidate]))
            // Employer
            .with_route("/jobs/manage", RoutePolicy::roles([Employer]))
            .with_route("/jobs/create", RoutePolicy::roles([Employer]))
            .with_route("/jobs/edit/:id", RoutePolicy::roles([Employer]))
            .with_route("/applicants", RoutePolicy::roles([Employer]))
            .with_route("/interviews", RoutePolicy::roles([Employer]))
            .with_route("/interviews/create", RoutePolicy::roles([Employer]))
            .with_route("/company", RoutePolicy::roles([Employer]))
            .with_route("/statistics", RoutePolicy::roles([Employer, Admin]))
            // Admin
            .with_route("/employers", RoutePolicy::roles([Admin]))
    }
}
