//! The access guard.

use serde::Serialize;

use vertdrop_entity::Role;

use crate::session::{Session, SessionStatus};

use super::rule::{self, RouteRule};

/// Outcome of guarding one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    /// A resolution is in flight; show a loading indicator.
    ShowLoading,
    /// No session; go to login and remember where we were heading.
    RedirectToLogin {
        /// The path originally requested.
        from: String,
    },
    /// Authenticated but the role is not admitted; go to the role's home.
    RedirectToDefault {
        /// Default landing path for the current role.
        to: String,
    },
    /// Render the requested view.
    Allow,
}

/// Stateless decision function over a session snapshot.
///
/// Evaluated on every navigation and never cached, so a role change or
/// logout takes effect on the next navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    /// Decide whether `session` may open `path` under `allowed_roles`.
    ///
    /// An empty `allowed_roles` admits any authenticated session.
    pub fn decide(session: &Session, path: &str, allowed_roles: &[Role]) -> AccessDecision {
        if session.status() == SessionStatus::Resolving {
            return AccessDecision::ShowLoading;
        }

        if !session.is_authenticated() {
            return AccessDecision::RedirectToLogin {
                from: path.to_string(),
            };
        }

        let role = session.role();
        if !rule::admits(allowed_roles, role) {
            return AccessDecision::RedirectToDefault {
                to: Self::default_landing(role).to_string(),
            };
        }

        AccessDecision::Allow
    }

    /// Decide against a route rule. Public routes are always allowed.
    pub fn check(session: &Session, path: &str, rule: &RouteRule) -> AccessDecision {
        if rule.public {
            return AccessDecision::Allow;
        }
        Self::decide(session, path, &rule.allowed_roles)
    }

    /// Home view of each role.
    pub fn default_landing(role: Option<Role>) -> &'static str {
        match role {
            Some(r) if r.is_staff() => "/admin",
            Some(Role::Livreur) => "/livreur",
            _ => "/client",
        }
    }
}
