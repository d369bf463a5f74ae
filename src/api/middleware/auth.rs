//! Session authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::AppState;
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::CurrentUser;
use crate::errors::AppError;

/// Resolve the session cookie into a `CurrentUser` request extension.
///
/// Runs on every route. No cookie, an unknown token or a session store
/// failure all leave the request anonymous.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        match state.auth_service.resolve_session(cookie.value()).await {
            Ok(Some(current_user)) => {
                request.extensions_mut().insert(current_user);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Session lookup failed: {}", e);
            }
        }
    }

    next.run(request).await
}

/// Gate for login-required routes: anonymous requests go to `/login`.
pub async fn require_login(request: Request, next: Next) -> Result<Response, AppError> {
    if request.extensions().get::<CurrentUser>().is_none() {
        return Err(AppError::LoginRequired);
    }

    Ok(next.run(request).await)
}
