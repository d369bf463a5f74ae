//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories (PostgreSQL)
//! - Session storage (Redis)
//! - Unit of Work for repository access

pub mod db;
pub mod repositories;
pub mod session_store;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    ListingRepository, ListingStore, ProfileRepository, ProfileStore, UserRepository, UserStore,
};
pub use session_store::{RedisSessionStore, SessionStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockListingRepository, MockProfileRepository, MockUserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use session_store::MockSessionStore;
#[cfg(any(test, feature = "test-utils"))]
pub use unit_of_work::MockUnitOfWork;
