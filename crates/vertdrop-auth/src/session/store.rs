//! The single source of truth for the current session.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use vertdrop_core::traits::CredentialStore;
use vertdrop_core::{AppError, AppResult};
use vertdrop_entity::{AuthToken, Identity};

use super::model::{Session, SessionStatus};

/// Holds the current [`Session`] and mirrors its token into a
/// [`CredentialStore`].
///
/// Every transition replaces the whole snapshot at once, so readers
/// (the access guard, the HTTP client) never observe a token paired with
/// a stale identity. Clones share the same state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Current snapshot plus change notification.
    state: Arc<watch::Sender<Session>>,
    /// Durable token slot.
    credentials: Arc<dyn CredentialStore>,
}

impl SessionStore {
    /// Create an idle store over the given credential slot.
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Self {
        let (tx, _rx) = watch::channel(Session::default());
        Self {
            state: Arc::new(tx),
            credentials,
        }
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<AuthToken> {
        self.state.borrow().token().cloned()
    }

    /// True iff a non-empty token is held.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Watch every future transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Token left in the durable slot by a previous run.
    pub async fn persisted_token(&self) -> AppResult<Option<AuthToken>> {
        let raw = self.credentials.load().await?;
        Ok(raw.map(AuthToken::new).filter(|t| !t.is_empty()))
    }

    /// Mark a resolution as in flight, keeping `token` if one is known.
    pub fn begin_resolving(&self, token: Option<AuthToken>) {
        debug!(has_token = token.is_some(), "Session resolving");
        self.state.send_replace(Session::resolving(token));
    }

    /// Install a fully resolved session and persist its token.
    ///
    /// Nothing changes if the token cannot be persisted.
    pub async fn set_session(&self, token: AuthToken, identity: Identity) -> AppResult<()> {
        if token.is_empty() {
            return Err(AppError::validation("Refusing to store an empty token"));
        }

        self.credentials.save(token.as_str()).await?;

        info!(
            user_id = identity.id,
            role = %identity.role,
            "Session established"
        );
        self.state.send_replace(Session::ready(token, identity));
        Ok(())
    }

    /// Drop token and identity, in memory and on disk.
    ///
    /// The in-memory session is always reset, even when erasing the
    /// durable slot fails.
    pub async fn clear_session(&self) -> AppResult<()> {
        let previous = self.state.send_replace(Session::default());
        if previous.status() != SessionStatus::Idle {
            info!(
                user_id = previous.identity().map(|i| i.id),
                "Session cleared"
            );
        }
        self.credentials.erase().await
    }

    /// Record a failed credential exchange in memory only.
    ///
    /// The durable slot is left untouched: a rejected login says nothing
    /// about the token a previous run persisted.
    pub fn record_failure(&self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!(reason = %reason, "Credential exchange failed");
        self.state.send_replace(Session::failed(reason));
    }

    /// Record a failed resolution. Token and identity are both dropped.
    pub async fn set_failed(&self, reason: impl Into<String>) -> AppResult<()> {
        let reason = reason.into();
        warn!(reason = %reason, "Session resolution failed");
        self.state.send_replace(Session::failed(reason));
        self.credentials.erase().await
    }
}
