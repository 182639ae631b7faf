//! The dashboard route table.

use vertdrop_entity::Role;

use crate::guard::RouteRule;

/// Entry point for anonymous users and the target of every forced logout.
pub const LOGIN_PATH: &str = "/login";

const STAFF: &[Role] = &[Role::Admin, Role::Manager];

/// Ordered set of route rules resolved by longest prefix.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Build a table from explicit rules.
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// The VertDrop dashboard routes.
    pub fn dashboard() -> Self {
        Self::new(vec![
            RouteRule::public(LOGIN_PATH),
            RouteRule::restricted("/admin", STAFF),
            RouteRule::restricted("/admin/users", STAFF),
            RouteRule::restricted("/admin/zones", STAFF),
            RouteRule::restricted("/admin/stats", STAFF),
            RouteRule::restricted("/admin/parcels", STAFF),
            RouteRule::restricted("/livreur", &[Role::Livreur]),
            RouteRule::restricted("/client", &[Role::Client]),
        ])
    }

    /// The most specific rule covering `path`, if any.
    pub fn resolve(&self, path: &str) -> Option<&RouteRule> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(path))
            .max_by_key(|rule| rule.path.len())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::dashboard()
    }
}

/// Canonical form of a requested path: leading slash, no query or
/// fragment, no trailing slash except for the root.
pub fn normalize_path(raw: &str) -> String {
    let path = raw
        .trim()
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
