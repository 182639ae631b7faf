//! Role enumeration and the canonical backend role mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use vertdrop_core::AppError;

/// Prefix some backends put in front of role names (`ROLE_ADMIN`).
const ROLE_PREFIX: &str = "ROLE_";

/// The closed set of permission tiers used to gate views.
///
/// Ordered by privilege level: Admin > Manager > Livreur > Client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full platform administrator.
    Admin,
    /// Operations manager; shares the admin views.
    Manager,
    /// Courier delivering parcels.
    Livreur,
    /// Customer tracking their own parcels.
    Client,
}

/// Canonical name → role. Every accepted backend spelling reduces to one
/// of these keys after trimming, upper-casing and prefix stripping.
const ROLE_TABLE: [(&str, Role); 4] = [
    ("ADMIN", Role::Admin),
    ("MANAGER", Role::Manager),
    ("LIVREUR", Role::Livreur),
    ("CLIENT", Role::Client),
];

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Livreur, Role::Client];

    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 4,
            Self::Manager => 3,
            Self::Livreur => 2,
            Self::Client => 1,
        }
    }

    /// Admins and managers share the back-office views.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Return the canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Livreur => "LIVREUR",
            Self::Client => "CLIENT",
        }
    }

    /// Map whatever the backend sent onto the closed role set.
    ///
    /// Total: a missing or unrecognized value falls back to
    /// [`Role::Client`], the least privileged tier, and is logged.
    pub fn from_backend(raw: Option<&str>) -> Role {
        match raw {
            Some(value) => value.parse().unwrap_or_else(|e: AppError| {
                tracing::warn!(role = value, error = %e, "Unrecognized role, defaulting to CLIENT");
                Role::Client
            }),
            None => {
                tracing::warn!("Identity carries no role, defaulting to CLIENT");
                Role::Client
            }
        }
    }

    /// Map a role list, keeping the most privileged recognized entry.
    pub fn from_backend_list<I, S>(raw: I) -> Role
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let best = raw
            .into_iter()
            .filter_map(|r| r.as_ref().parse::<Role>().ok())
            .max_by_key(Role::privilege_level);

        best.unwrap_or_else(|| {
            tracing::warn!("No recognized role in list, defaulting to CLIENT");
            Role::Client
        })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let name = upper.strip_prefix(ROLE_PREFIX).unwrap_or(&upper);

        ROLE_TABLE
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, role)| *role)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid role: '{s}'. Expected one of: ADMIN, MANAGER, LIVREUR, CLIENT"
                ))
            })
    }
}
