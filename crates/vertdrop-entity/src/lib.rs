//! # vertdrop-entity
//!
//! Value types shared by the VertDrop crates: the closed role set and its
//! canonical mapping, the resolved identity, the bearer token, and the
//! credential payloads sent to the backend.

mod lenient;
pub mod request;
pub mod token;
pub mod user;

pub use request::{LoginCredentials, RegisterRequest};
pub use token::{AuthResponse, AuthToken};
pub use user::{Identity, RawIdentity, Role};
