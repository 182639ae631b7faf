//! Bearer token inspection.

pub mod claims;

pub use claims::TokenClaims;
