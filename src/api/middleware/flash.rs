//! Flash message middleware.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::flash::Flash;
use crate::config::FLASH_COOKIE_NAME;

/// Expose a pending flash message to handlers and consume it.
///
/// The cookie survives redirects and is cleared by the first response
/// that actually renders a page.
pub async fn flash_middleware(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let pending = jar.get(FLASH_COOKIE_NAME).map(|c| Flash::from_code(c.value()));

    if let Some(Some(flash)) = pending {
        request.extensions_mut().insert(flash);
    }

    let response = next.run(request).await;

    if pending.is_some() && !response.status().is_redirection() {
        return (jar.remove(Flash::removal()), response).into_response();
    }
    response
}
