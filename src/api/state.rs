//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services plus the
//! cookie policy handlers need when opening or closing sessions.

use axum_extra::extract::cookie::{Cookie, SameSite};
use std::sync::Arc;

use crate::config::{Config, SESSION_COOKIE_NAME};
use crate::services::{AuthService, ListingService, ProfileService, ServiceContainer};

/// How the session cookie is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookies {
    pub ttl_seconds: u64,
    pub secure: bool,
}

impl SessionCookies {
    pub fn from_config(config: &Config) -> Self {
        Self {
            ttl_seconds: config.session_ttl_seconds,
            secure: config.session_cookie_secure,
        }
    }

    /// Cookie carrying a freshly issued session token
    pub fn issue(&self, token: String) -> Cookie<'static> {
        let max_age = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        Cookie::build((SESSION_COOKIE_NAME, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(cookie::time::Duration::seconds(max_age))
            .build()
    }

    /// Cookie that clears the session on the client
    pub fn removal(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE_NAME).path("/").build()
    }
}

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and sessions
    pub auth_service: Arc<dyn AuthService>,
    /// Listing search and CRUD
    pub listing_service: Arc<dyn ListingService>,
    /// Profile pages and edits
    pub profile_service: Arc<dyn ProfileService>,
    pub cookies: SessionCookies,
}

impl AppState {
    /// Create application state from a service container.
    pub fn from_services(container: &dyn ServiceContainer, cookies: SessionCookies) -> Self {
        Self {
            auth_service: container.auth(),
            listing_service: container.listings(),
            profile_service: container.profiles(),
            cookies,
        }
    }
}
