//! Request-scoped identity extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;

use crate::api::flash::Flash;
use crate::domain::CurrentUser;
use crate::errors::AppError;

/// Who is looking at the page, plus any pending flash message.
///
/// Never rejects; anonymous visitors get `user: None`.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    pub user: Option<CurrentUser>,
    pub flash: Option<Flash>,
}

impl Viewer {
    /// Whether the viewer is the user `user_id`
    pub fn is(&self, user_id: uuid::Uuid) -> bool {
        self.user.as_ref().is_some_and(|u| u.id == user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            user: parts.extensions.get::<CurrentUser>().cloned(),
            flash: parts.extensions.get::<Flash>().copied(),
        })
    }
}

/// The logged-in caller. Rejects anonymous requests with a redirect to
/// the login page.
#[derive(Debug, Clone)]
pub struct Authenticated(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(Authenticated)
            .ok_or(AppError::LoginRequired)
    }
}
