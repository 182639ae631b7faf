//! Session-related domain events.

use serde::{Deserialize, Serialize};

/// Events related to the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Login (or registration) completed and the session is ready.
    Established {
        /// The identity ID.
        user_id: i64,
        /// The canonical role name.
        role: String,
    },
    /// A persisted token was re-resolved at startup.
    Restored {
        /// The identity ID.
        user_id: i64,
        /// The canonical role name.
        role: String,
    },
    /// The user logged out.
    LoggedOut {
        /// The identity ID, if one was resolved.
        user_id: Option<i64>,
    },
    /// The session was cleared without an explicit logout.
    Cleared {
        /// Why the session ended.
        reason: String,
    },
    /// Resolution failed and the session was reset.
    Failed {
        /// The user-visible failure reason.
        reason: String,
    },
    /// A request was answered with HTTP 401; the application must return
    /// to the login entry point.
    Unauthorized {
        /// Path of the request that was rejected.
        request_path: String,
    },
}

impl SessionEvent {
    /// Returns whether this event forces the application back to login.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}
