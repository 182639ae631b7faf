//! The seam between identity resolution and the backend transport.

use async_trait::async_trait;

use vertdrop_core::AppResult;
use vertdrop_entity::{AuthResponse, AuthToken, LoginCredentials, RawIdentity, RegisterRequest};

/// Remote authority that issues tokens and describes their holder.
///
/// Implementations map transport failures onto the error taxonomy:
/// a rejected login is `InvalidCredentials`, a rejected token is
/// `Unauthorized`, no response is `Network`, a 5xx is `Server`.
#[async_trait]
pub trait AuthBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Exchange credentials for a token.
    async fn authenticate(&self, credentials: &LoginCredentials) -> AppResult<AuthResponse>;

    /// Create an account and receive a token for it.
    async fn register(&self, request: &RegisterRequest) -> AppResult<AuthResponse>;

    /// Describe the holder of `token`.
    async fn fetch_identity(&self, token: &AuthToken) -> AppResult<RawIdentity>;
}
