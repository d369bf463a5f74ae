//! API middleware.

mod auth;
mod flash;

pub use auth::{require_login, session_middleware};
pub use flash::flash_middleware;
