//! Application route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{
    auth_routes, listing_owner_routes, listing_routes, profile_owner_routes, profile_routes,
};
use super::middleware::{flash_middleware, require_login, session_middleware};
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    // Login-required routes
    let protected = Router::new()
        .merge(listing_owner_routes())
        .merge(profile_owner_routes())
        .route_layer(middleware::from_fn(require_login));

    Router::new()
        .merge(listing_routes())
        .merge(profile_routes())
        .merge(auth_routes())
        .merge(protected)
        // Global middleware
        .layer(middleware::from_fn(flash_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
