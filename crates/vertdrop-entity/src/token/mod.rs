//! Bearer token value types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::user::RawIdentity;

/// An opaque bearer credential issued by the backend.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token string. Surrounding whitespace is dropped.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self(raw.trim().to_string())
    }

    /// The raw token, for the `Authorization` header and persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty token never counts as authenticated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(<{} bytes>)", self.0.len())
    }
}

impl From<&str> for AuthToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AuthToken {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Body returned by the login and register endpoints.
///
/// Some backend versions embed the identity, others only the token; the
/// identity is always re-resolved separately, so `user` is informational and
/// an embedded record that does not parse is dropped rather than failing
/// the exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The issued bearer token.
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    /// Identity payload, when the backend includes one.
    #[serde(default, deserialize_with = "crate::lenient::optional")]
    pub user: Option<RawIdentity>,
}
