//! Credential exchange and identity resolution.
//!
//! The resolver is the only writer of a `Ready` session. Every path
//! either ends with `set_session` or leaves the store without a token.

pub mod backend;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, warn};
use validator::Validate;

use vertdrop_core::events::{EventBus, SessionEvent};
use vertdrop_core::{AppError, AppResult};
use vertdrop_entity::{AuthResponse, AuthToken, Identity, LoginCredentials, RegisterRequest};

use crate::session::{Session, SessionStore};
use crate::token::TokenClaims;

pub use backend::AuthBackend;

/// Turns credentials or a persisted token into a ready session.
#[derive(Clone)]
pub struct IdentityResolver {
    /// Token issuer and identity source.
    backend: Arc<dyn AuthBackend>,
    /// Session being populated.
    store: SessionStore,
    /// Session event fan-out.
    events: EventBus,
    /// Tokens expiring within this many seconds are treated as expired.
    expiry_leeway_seconds: i64,
    /// Set while a login, register or restore is running.
    in_flight: Arc<AtomicBool>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityResolver")
            .field("backend", &self.backend)
            .field("expiry_leeway_seconds", &self.expiry_leeway_seconds)
            .field("in_flight", &self.in_flight.load(Ordering::Relaxed))
            .finish()
    }
}

/// Clears the in-flight flag when the operation ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl IdentityResolver {
    /// Creates a resolver writing into `store`.
    pub fn new(backend: Arc<dyn AuthBackend>, store: SessionStore, events: EventBus) -> Self {
        Self {
            backend,
            store,
            events,
            expiry_leeway_seconds: 0,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sets the expiry leeway used by [`Self::restore`].
    pub fn with_expiry_leeway(mut self, seconds: i64) -> Self {
        self.expiry_leeway_seconds = seconds.max(0);
        self
    }

    /// Log in with `credentials`.
    ///
    /// The identity is always fetched with the new token, even when the
    /// login response already carried one. If that lookup fails nothing
    /// is persisted and the session is left unauthenticated. A rejected
    /// exchange leaves any previously persisted token in place.
    pub async fn login(&self, credentials: LoginCredentials) -> AppResult<Session> {
        credentials.validate()?;
        let _flight = self.acquire("login")?;

        info!(username = %credentials.username, "Logging in");
        self.store.begin_resolving(None);

        let response = match self.backend.authenticate(&credentials).await {
            Ok(response) => response,
            Err(e) => return Err(self.reject(e)),
        };

        self.complete(response, |identity| SessionEvent::Established {
            user_id: identity.id,
            role: identity.role.to_string(),
        })
        .await
    }

    /// Register a new account, then resolve it exactly like [`Self::login`].
    pub async fn register(&self, request: RegisterRequest) -> AppResult<Session> {
        request.validate()?;
        let _flight = self.acquire("registration")?;

        info!(email = %request.email, role = %request.role, "Registering account");
        self.store.begin_resolving(None);

        let response = match self.backend.register(&request).await {
            Ok(response) => response,
            Err(e) => return Err(self.reject(e)),
        };

        self.complete(response, |identity| SessionEvent::Established {
            user_id: identity.id,
            role: identity.role.to_string(),
        })
        .await
    }

    /// Fetch and map the identity behind `token`.
    ///
    /// A rejected token clears the session before the error is returned.
    pub async fn resolve_identity(&self, token: &AuthToken) -> AppResult<Identity> {
        match self.backend.fetch_identity(token).await {
            Ok(raw) => {
                let identity = raw.into_identity();
                debug!(user_id = identity.id, role = %identity.role, "Identity resolved");
                Ok(identity)
            }
            Err(e) if e.is_unauthorized() => {
                warn!(error = %e, "Token rejected during identity resolution");
                if let Err(clear_err) = self.store.clear_session().await {
                    error!(error = %clear_err, "Failed to clear session");
                }
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Re-establish the session from the persisted token, if any.
    ///
    /// A JWT whose `exp` has visibly passed is discarded without a network
    /// call. A token the backend rejects yields `Ok(None)`.
    pub async fn restore(&self) -> AppResult<Option<Session>> {
        let Some(token) = self.store.persisted_token().await? else {
            debug!("No persisted token");
            return Ok(None);
        };
        let _flight = self.acquire("session restore")?;

        let expired = TokenClaims::peek(token.as_str())
            .filter(|claims| claims.is_expired(self.expiry_leeway_seconds));
        if let Some(claims) = expired {
            info!(
                subject = ?claims.subject(),
                expired_at = ?claims.expires_at(),
                "Persisted token has expired"
            );
            self.store.clear_session().await?;
            self.events.publish(
                None,
                SessionEvent::Cleared {
                    reason: "token expired".to_string(),
                },
            );
            return Ok(None);
        }

        self.store.begin_resolving(Some(token.clone()));

        let identity = match self.resolve_identity(&token).await {
            Ok(identity) => identity,
            Err(e) if e.is_unauthorized() => {
                self.events.publish(
                    None,
                    SessionEvent::Cleared {
                        reason: "token rejected".to_string(),
                    },
                );
                return Ok(None);
            }
            Err(e) => return Err(self.fail(e).await),
        };

        let event = SessionEvent::Restored {
            user_id: identity.id,
            role: identity.role.to_string(),
        };
        self.install(token, identity, event).await.map(Some)
    }

    /// End the session and announce it.
    pub async fn logout(&self) -> AppResult<()> {
        let user_id = self.store.snapshot().identity().map(|i| i.id);
        self.store.clear_session().await?;
        info!(user_id = ?user_id, "Logged out");
        self.events.publish(user_id, SessionEvent::LoggedOut { user_id });
        Ok(())
    }

    fn acquire(&self, operation: &str) -> AppResult<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| {
                AppError::conflict(format!(
                    "Cannot start {operation}: another authentication is in progress"
                ))
            })?;
        Ok(InFlight(&self.in_flight))
    }

    async fn complete(
        &self,
        response: AuthResponse,
        event: impl FnOnce(&Identity) -> SessionEvent,
    ) -> AppResult<Session> {
        let token = AuthToken::new(response.token);
        if token.is_empty() {
            return Err(self.reject(AppError::server("Backend returned an empty token")));
        }

        self.store.begin_resolving(Some(token.clone()));

        let identity = match self.resolve_identity(&token).await {
            Ok(identity) => identity,
            Err(e) => return Err(self.fail(e).await),
        };

        let event = event(&identity);
        self.install(token, identity, event).await
    }

    async fn install(
        &self,
        token: AuthToken,
        identity: Identity,
        event: SessionEvent,
    ) -> AppResult<Session> {
        let user_id = identity.id;
        if let Err(e) = self.store.set_session(token, identity).await {
            return Err(self.fail(e).await);
        }
        self.events.publish(Some(user_id), event);
        Ok(self.store.snapshot())
    }

    /// Record a credential exchange that produced no token.
    ///
    /// Says nothing about the persisted token, so the slot is left alone.
    fn reject(&self, err: AppError) -> AppError {
        self.store.record_failure(err.message.clone());
        self.events.publish(
            None,
            SessionEvent::Failed {
                reason: err.to_string(),
            },
        );
        err
    }

    /// Reset the session after resolving a token failed and hand the error back.
    async fn fail(&self, err: AppError) -> AppError {
        let reset = if err.is_unauthorized() {
            self.store.clear_session().await
        } else {
            self.store.set_failed(err.message.clone()).await
        };
        if let Err(reset_err) = reset {
            error!(error = %reset_err, "Failed to reset session");
        }

        self.events.publish(
            None,
            SessionEvent::Failed {
                reason: err.to_string(),
            },
        );
        err
    }
}
