//! Core traits defined in `vertdrop-core` and implemented by other crates.

pub mod credential;

pub use credential::CredentialStore;
