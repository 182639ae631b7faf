//! Dashboard routing: route table, navigator and role-filtered menu.

pub mod menu;
pub mod navigator;
pub mod routes;

pub use menu::MenuItem;
pub use navigator::{NavigationOutcome, Navigator, RedirectReason};
pub use routes::RouteTable;
