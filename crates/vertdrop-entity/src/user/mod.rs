//! Identity domain entities.

pub mod model;
pub mod role;

pub use model::{Identity, RawIdentity};
pub use role::Role;
