//! # vertdrop-http
//!
//! HTTP access to the VertDrop backend.
//!
//! Every request made with the session token goes through [`ApiClient`],
//! which ends the session and announces it on the event bus whenever the
//! backend answers 401.

pub mod backend;
pub mod client;
pub mod error;

pub use backend::HttpAuthBackend;
pub use client::ApiClient;
