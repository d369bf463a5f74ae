//! Service Container - Centralized service access.
//!
//! Handlers reach every use case through one `Arc`ed container; the
//! concrete services underneath share a single Unit of Work.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, ListingManager, ListingService, ProfileManager, ProfileService,
};
use crate::infra::{Persistence, SessionStore, UnitOfWork};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get listing service
    fn listings(&self) -> Arc<dyn ListingService>;

    /// Get profile service
    fn profiles(&self) -> Arc<dyn ProfileService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    listing_service: Arc<dyn ListingService>,
    profile_service: Arc<dyn ProfileService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        listing_service: Arc<dyn ListingService>,
        profile_service: Arc<dyn ProfileService>,
    ) -> Self {
        Self {
            auth_service,
            listing_service,
            profile_service,
        }
    }

    /// Create service container from a database connection and session store
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self::from_unit_of_work(Arc::new(Persistence::new(db)), sessions)
    }

    /// Create service container over any Unit of Work implementation
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(
        uow: Arc<U>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self::new(
            Arc::new(Authenticator::new(uow.clone(), sessions)),
            Arc::new(ListingManager::new(uow.clone())),
            Arc::new(ProfileManager::new(uow)),
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn listings(&self) -> Arc<dyn ListingService> {
        self.listing_service.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileService> {
        self.profile_service.clone()
    }
}
