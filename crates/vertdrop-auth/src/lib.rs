//! # vertdrop-auth
//!
//! Access control and session lifecycle for the VertDrop console.
//!
//! ## Modules
//!
//! - `session`: the session store and the persisted credential slot
//! - `token`: unverified peek at JWT claims (expiry pre-check)
//! - `resolver`: credential exchange and identity resolution
//! - `guard`: the per-navigation access decision
//! - `navigation`: route table, navigator and role-filtered menu

pub mod guard;
pub mod navigation;
pub mod resolver;
pub mod session;
pub mod token;

pub use guard::{AccessDecision, AccessGuard, RouteRule};
pub use navigation::{MenuItem, NavigationOutcome, Navigator, RedirectReason, RouteTable};
pub use resolver::{AuthBackend, IdentityResolver};
pub use session::{
    FileCredentialStore, MemoryCredentialStore, Session, SessionStatus, SessionStore,
};
pub use token::TokenClaims;
