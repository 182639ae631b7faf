//! The backend API client and its 401 hook.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use vertdrop_auth::SessionStore;
use vertdrop_core::config::ApiConfig;
use vertdrop_core::events::{EventBus, SessionEvent};
use vertdrop_core::{AppError, AppResult, ErrorKind};
use vertdrop_entity::AuthToken;

use crate::error::{from_response, from_transport};

/// How a 401 answer is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OnUnauthorized {
    /// The token was rejected: end the session and announce it.
    EndSession,
    /// The submitted credentials were rejected.
    InvalidCredentials,
}

/// HTTP client bound to the backend base URL and the session store.
///
/// Requests carry the current session token as a bearer credential. Any
/// 401 answer clears the session and publishes
/// [`SessionEvent::Unauthorized`] before the error reaches the caller.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
    events: EventBus,
}

impl ApiClient {
    /// Build a client from the API settings.
    pub fn new(config: &ApiConfig, store: SessionStore, events: EventBus) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .user_agent(concat!("vertdrop/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            events,
        })
    }

    /// Backend base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session store whose token this client sends.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Absolute URL for `path`. Absolute URLs pass through unchanged.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET path` with the session token.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let request = self.authorize(self.http.get(self.url(path)), self.store.token());
        self.execute(request, path, OnUnauthorized::EndSession).await
    }

    /// `POST path` with a JSON body and the session token.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorize(self.http.post(self.url(path)).json(body), self.store.token());
        self.execute(request, path, OnUnauthorized::EndSession).await
    }

    /// `GET path` with an explicit token instead of the session's.
    pub async fn get_json_with<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &AuthToken,
    ) -> AppResult<T> {
        let request = self.authorize(self.http.get(self.url(path)), Some(token.clone()));
        self.execute(request, path, OnUnauthorized::EndSession).await
    }

    /// `POST path` without a bearer token. A 401 here means the submitted
    /// credentials were wrong; the session is left alone.
    pub(crate) async fn post_credentials<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(request, path, OnUnauthorized::InvalidCredentials)
            .await
    }

    fn authorize(
        &self,
        request: reqwest::RequestBuilder,
        token: Option<AuthToken>,
    ) -> reqwest::RequestBuilder {
        match token.filter(|t| !t.is_empty()) {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
        on_unauthorized: OnUnauthorized,
    ) -> AppResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| from_transport(e, path))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| from_transport(e, path))?;
        debug!(path, status, bytes = body.len(), "Backend response");

        if status == 401 {
            return Err(match on_unauthorized {
                OnUnauthorized::EndSession => self.end_session(path).await,
                OnUnauthorized::InvalidCredentials => {
                    AppError::invalid_credentials("Identifiant ou mot de passe incorrect")
                }
            });
        }

        if !(200..300).contains(&status) {
            let err = from_response(status, &body, path);
            warn!(path, status, error = %err, "Backend request failed");
            return Err(err);
        }

        let payload = if body.trim().is_empty() { "null" } else { body.as_str() };
        Ok(serde_json::from_str(payload)?)
    }

    /// The 401 hook.
    async fn end_session(&self, path: &str) -> AppError {
        let user_id = self.store.snapshot().identity().map(|i| i.id);
        warn!(path, user_id = ?user_id, "Token rejected by backend, ending session");

        if let Err(e) = self.store.clear_session().await {
            error!(error = %e, "Failed to clear session after 401");
        }
        self.events.publish(
            user_id,
            SessionEvent::Unauthorized {
                request_path: path.to_string(),
            },
        );

        AppError::unauthorized(format!("Session expired or invalid ({path})"))
    }
}
