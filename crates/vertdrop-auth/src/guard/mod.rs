//! Per-navigation access decision.

pub mod decision;
pub mod rule;

pub use decision::{AccessDecision, AccessGuard};
pub use rule::RouteRule;
