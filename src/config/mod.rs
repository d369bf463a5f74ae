//! Application configuration.
//!
//! Runtime settings come from the environment (`settings`); defaults,
//! validation limits and user-facing messages live in `constants`.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
