//! HTTP request handlers.

pub mod auth_handler;
pub mod listing_handler;
pub mod profile_handler;

pub use auth_handler::auth_routes;
pub use listing_handler::{listing_owner_routes, listing_routes};
pub use profile_handler::{profile_owner_routes, profile_routes};
