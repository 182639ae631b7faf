//! Session state, its store, and the persisted credential slot.

pub mod credential;
pub mod model;
pub mod store;

pub use credential::{FileCredentialStore, MemoryCredentialStore};
pub use model::{Session, SessionStatus};
pub use store::SessionStore;
