//! Unverified view of the claims carried by a JWT bearer token.
//!
//! The console never holds the signing key, so the signature is not
//! checked here; the backend stays the authority. Peeking only lets a
//! restore skip the identity round-trip for a token that has visibly
//! expired.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims decoded from the payload segment of a JWT.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject. Backends send either the username or the numeric id.
    #[serde(default)]
    pub sub: Option<serde_json::Value>,
    /// Expiration timestamp (seconds since epoch).
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Decode the payload of `token` without verifying it.
    ///
    /// Returns `None` for anything that is not a three-segment JWT with a
    /// JSON object payload; opaque tokens are therefore left alone.
    pub fn peek(token: &str) -> Option<Self> {
        let mut segments = token.trim().split('.');
        let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
        if segments.next().is_some() {
            return None;
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Subject rendered as a string.
    pub fn subject(&self) -> Option<String> {
        match self.sub.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Whether the token expires within `leeway_seconds` from now.
    ///
    /// A token without `exp` never counts as expired.
    pub fn is_expired(&self, leeway_seconds: i64) -> bool {
        self.is_expired_at(Utc::now(), leeway_seconds)
    }

    /// Same as [`Self::is_expired`] against an explicit clock.
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway_seconds: i64) -> bool {
        self.exp
            .is_some_and(|exp| now.timestamp().saturating_add(leeway_seconds) >= exp)
    }
}
