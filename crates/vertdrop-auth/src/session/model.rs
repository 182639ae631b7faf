//! Session state snapshot.

use serde::{Deserialize, Serialize};

use vertdrop_entity::{AuthToken, Identity, Role};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No session and nothing in flight.
    #[default]
    Idle,
    /// A login or identity resolution call is in flight.
    Resolving,
    /// Token and identity are both present.
    Ready,
    /// The last resolution failed; see [`Session::failure`].
    Failed,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Resolving => write!(f, "resolving"),
            Self::Ready => write!(f, "ready"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Immutable snapshot of the authentication state.
///
/// Only the constructors below can build one, and each of them upholds
/// the pairing rule: an identity is present only together with a token,
/// and a token without identity only exists while `Resolving`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Session {
    #[serde(skip)]
    token: Option<AuthToken>,
    identity: Option<Identity>,
    status: SessionStatus,
    failure: Option<String>,
}

impl Session {
    pub(crate) fn resolving(token: Option<AuthToken>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            identity: None,
            status: SessionStatus::Resolving,
            failure: None,
        }
    }

    pub(crate) fn ready(token: AuthToken, identity: Identity) -> Self {
        Self {
            token: Some(token),
            identity: Some(identity),
            status: SessionStatus::Ready,
            failure: None,
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            token: None,
            identity: None,
            status: SessionStatus::Failed,
            failure: Some(reason.into()),
        }
    }

    /// The bearer token, if any.
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// The resolved identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Reason recorded by the last failed resolution.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// True iff a non-empty token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Role of the resolved identity.
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }
}
