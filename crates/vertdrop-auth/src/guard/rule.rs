//! Access requirements attached to a route.

use serde::Serialize;

use vertdrop_entity::Role;

/// A route path and who may see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRule {
    /// Path prefix this rule covers, e.g. `/admin`.
    pub path: String,
    /// Reachable without a session.
    pub public: bool,
    /// Roles admitted. Empty means any authenticated role.
    pub allowed_roles: Vec<Role>,
}

impl RouteRule {
    /// A route anyone may open.
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            public: true,
            allowed_roles: Vec::new(),
        }
    }

    /// A route requiring a session but no particular role.
    pub fn authenticated(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            public: false,
            allowed_roles: Vec::new(),
        }
    }

    /// A route restricted to `roles`.
    pub fn restricted(path: impl Into<String>, roles: &[Role]) -> Self {
        Self {
            path: path.into(),
            public: false,
            allowed_roles: roles.to_vec(),
        }
    }

    /// Whether `path` falls under this rule, on a segment boundary.
    pub fn matches(&self, path: &str) -> bool {
        if self.path == "/" {
            return path == "/";
        }
        path == self.path
            || path
                .strip_prefix(self.path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Whether `role` passes a role filter. An empty filter admits any role.
pub(super) fn admits(allowed_roles: &[Role], role: Option<Role>) -> bool {
    allowed_roles.is_empty() || role.is_some_and(|r| allowed_roles.contains(&r))
}
