//! Identity models: the backend payload and its resolved form.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// The resolved record of the authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique numeric identifier.
    pub id: i64,
    /// Canonical role.
    pub role: Role,
    /// Human-readable name.
    pub display_name: String,
    /// Email address (may be empty if the backend only knows a username).
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
}

/// Identity record as returned by the backend.
///
/// Field spellings vary between backend versions, so both the French
/// (`nom`, `prenom`, `telephone`) and English names are accepted, and the
/// role may arrive as a single value or as a list. A role of any other
/// shape is read as absent and later defaults to `Client`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIdentity {
    /// Unique numeric identifier.
    pub id: i64,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Family name.
    #[serde(default, alias = "nom")]
    pub last_name: Option<String>,
    /// Given name.
    #[serde(default, alias = "prenom")]
    pub first_name: Option<String>,
    /// Single role, possibly `ROLE_`-prefixed.
    #[serde(default, deserialize_with = "crate::lenient::optional")]
    pub role: Option<String>,
    /// Role list (token-style payloads).
    #[serde(default, deserialize_with = "crate::lenient::string_list")]
    pub roles: Option<Vec<String>>,
    /// Phone number.
    #[serde(default, alias = "telephone")]
    pub phone: Option<String>,
}

impl RawIdentity {
    /// Resolve the canonical role: an explicit `role` wins over `roles`.
    pub fn canonical_role(&self) -> Role {
        match (&self.role, &self.roles) {
            (Some(role), _) => Role::from_backend(Some(role.as_str())),
            (None, Some(roles)) => Role::from_backend_list(roles),
            (None, None) => Role::from_backend(None),
        }
    }

    /// Display name: "last first", falling back to username, email, then id.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.last_name.as_deref(), self.first_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if !parts.is_empty() {
            return parts.join(" ");
        }

        self.username
            .as_deref()
            .or(self.email.as_deref())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .unwrap_or_else(|| format!("user #{}", self.id))
    }

    /// Convert into the resolved identity.
    pub fn into_identity(self) -> Identity {
        let role = self.canonical_role();
        let display_name = self.display_name();
        let email = self
            .email
            .or(self.username)
            .unwrap_or_default();

        Identity {
            id: self.id,
            role,
            display_name,
            email,
            phone: self.phone.filter(|p| !p.trim().is_empty()),
        }
    }
}

impl From<RawIdentity> for Identity {
    fn from(raw: RawIdentity) -> Self {
        raw.into_identity()
    }
}
