//! Classifieds - a small classifieds site.
//!
//! Users register with a profile, post listings with an optional price and
//! image, search them, and edit only what they own. Pages are server-rendered
//! HTML; sessions live in Redis and data in PostgreSQL.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **forms**: Form payloads and validation
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, sessions)
//! - **api**: HTTP handlers, middleware, routes and templates
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod forms;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Listing, Password, Profile, User};
pub use errors::{AppError, AppResult};
