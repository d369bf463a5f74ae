//! Unit of Work: one access point for every repository.
//!
//! Services depend on this trait rather than on individual stores, so a
//! single `Arc<dyn UnitOfWork>` (or a mock) wires the whole data layer.
//! Multi-table writes that must be atomic (user + profile at registration)
//! run their transaction inside the owning repository.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    ListingRepository, ListingStore, ProfileRepository, ProfileStore, UserRepository, UserStore,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Unit of Work trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get profile repository
    fn profiles(&self) -> Arc<dyn ProfileRepository>;

    /// Get listing repository
    fn listings(&self) -> Arc<dyn ListingRepository>;
}

/// SeaORM-backed implementation of UnitOfWork
pub struct Persistence {
    user_repo: Arc<UserStore>,
    profile_repo: Arc<ProfileStore>,
    listing_repo: Arc<ListingStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            profile_repo: Arc::new(ProfileStore::new(db.clone())),
            listing_repo: Arc::new(ListingStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        self.profile_repo.clone()
    }

    fn listings(&self) -> Arc<dyn ListingRepository> {
        self.listing_repo.clone()
    }
}
