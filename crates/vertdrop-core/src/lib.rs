//! # vertdrop-core
//!
//! Core crate for the VertDrop console. Contains configuration schemas,
//! the unified error system, session domain events with their bus, and
//! the traits implemented by the other crates.
//!
//! This crate has **no** internal dependencies on other VertDrop crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
