//! Session persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the bearer token survives process restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the credential slot.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
    /// Name of the single credential slot.
    #[serde(default = "default_slot_name")]
    pub slot_name: String,
    /// Clock skew tolerated when checking a stored token's `exp` claim.
    #[serde(default = "default_leeway")]
    pub expiry_leeway_seconds: i64,
}

impl SessionConfig {
    /// Full path of the credential slot file.
    pub fn slot_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_dir).join(&self.slot_name)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            slot_name: default_slot_name(),
            expiry_leeway_seconds: default_leeway(),
        }
    }
}

fn default_storage_dir() -> String {
    "data/session".to_string()
}

fn default_slot_name() -> String {
    "vertdrop_token".to_string()
}

fn default_leeway() -> i64 {
    5
}
