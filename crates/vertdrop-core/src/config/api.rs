//! Backend API endpoint configuration.

use serde::{Deserialize, Serialize};

/// Where the REST backend lives and which paths the auth flow uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every relative path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Credential exchange endpoint.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Account registration endpoint.
    #[serde(default = "default_register_path")]
    pub register_path: String,
    /// Identity resolution endpoint.
    #[serde(default = "default_identity_path")]
    pub identity_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            login_path: default_login_path(),
            register_path: default_register_path(),
            identity_path: default_identity_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_register_path() -> String {
    "/auth/register".to_string()
}

fn default_identity_path() -> String {
    "/auth/me".to_string()
}
