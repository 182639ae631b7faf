//! `AuthBackend` over the backend's REST endpoints.

use async_trait::async_trait;

use vertdrop_auth::AuthBackend;
use vertdrop_core::AppResult;
use vertdrop_core::config::ApiConfig;
use vertdrop_entity::{AuthResponse, AuthToken, LoginCredentials, RawIdentity, RegisterRequest};

use crate::client::ApiClient;

/// Auth endpoints reached through an [`ApiClient`].
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: ApiClient,
    login_path: String,
    register_path: String,
    identity_path: String,
}

impl HttpAuthBackend {
    /// Use the endpoint paths from `config`.
    pub fn new(client: ApiClient, config: &ApiConfig) -> Self {
        Self {
            client,
            login_path: config.login_path.clone(),
            register_path: config.register_path.clone(),
            identity_path: config.identity_path.clone(),
        }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn authenticate(&self, credentials: &LoginCredentials) -> AppResult<AuthResponse> {
        self.client
            .post_credentials(&self.login_path, credentials)
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> AppResult<AuthResponse> {
        self.client
            .post_credentials(&self.register_path, request)
            .await
    }

    async fn fetch_identity(&self, token: &AuthToken) -> AppResult<RawIdentity> {
        self.client.get_json_with(&self.identity_path, token).await
    }
}
