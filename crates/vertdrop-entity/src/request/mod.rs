//! Credential payloads sent to the backend.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::user::Role;

/// Login form: email or username plus password.
///
/// Serialized as `{username, password}`, which is what the auth endpoint
/// expects regardless of whether the identifier is an email.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginCredentials {
    /// Email address or username.
    #[validate(length(min = 1, message = "identifier is required"))]
    pub username: String,
    /// Plain-text password.
    #[validate(length(min = 4, message = "password must be at least 4 characters"))]
    pub password: String,
}

impl LoginCredentials {
    /// Build credentials, trimming the identifier.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into().trim().to_string(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Account registration form.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, also the login identifier.
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    /// Plain-text password.
    #[validate(length(min = 4, message = "password must be at least 4 characters"))]
    pub password: String,
    /// Family name.
    #[validate(length(min = 1, message = "last name is required"))]
    pub nom: String,
    /// Given name.
    #[validate(length(min = 1, message = "first name is required"))]
    pub prenom: String,
    /// Phone number.
    pub telephone: String,
    /// Requested role.
    pub role: Role,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
