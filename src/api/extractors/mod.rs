//! Custom extractors.

mod viewer;

pub use viewer::{Authenticated, Viewer};
