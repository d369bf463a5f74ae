//! API layer - HTTP handlers and middleware
//!
//! This module contains all HTTP-related concerns:
//! - Request handlers and route definitions
//! - Middleware (sessions, login gate, flash messages)
//! - Custom extractors
//! - HTML rendering

pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::create_router;
pub use state::{AppState, SessionCookies};
