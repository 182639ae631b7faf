//! Durable slot for the bearer token.

use async_trait::async_trait;

use crate::result::AppResult;

/// A single named slot holding the bearer token across restarts.
///
/// Only the session store writes to it. A ready session's token is always
/// the persisted one; after a rejected login the slot keeps the token of
/// the last established session.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read the stored token, if any.
    async fn load(&self) -> AppResult<Option<String>>;

    /// Replace the stored token.
    async fn save(&self, token: &str) -> AppResult<()>;

    /// Erase the stored token. Erasing an empty slot is not an error.
    async fn erase(&self) -> AppResult<()>;
}
