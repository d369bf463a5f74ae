//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState, SessionCookies};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, RedisSessionStore};
use crate::services::Services;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    let config = args.apply(config);
    tracing::info!("Starting server...");

    // Pending migrations are applied before any request is served
    let db = Database::connect(&config).await?;
    db.ping().await?;

    let sessions = Arc::new(RedisSessionStore::connect(&config).await?);

    let services = Services::from_connection(db.get_connection(), sessions);
    let app = create_router(AppState::from_services(
        &services,
        SessionCookies::from_config(&config),
    ));

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))
}
