//! One-shot messages carried across a redirect.
//!
//! The cookie holds only a short code; the text is looked up here, so a
//! client can't inject arbitrary messages into a page.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::{FLASH_COOKIE_NAME, LISTING_DELETED_MESSAGE, PROFILE_EDIT_FORBIDDEN_MESSAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    ProfileEditForbidden,
    ListingDeleted,
}

impl Flash {
    pub fn code(self) -> &'static str {
        match self {
            Flash::ProfileEditForbidden => "profile_edit_forbidden",
            Flash::ListingDeleted => "listing_deleted",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "profile_edit_forbidden" => Some(Flash::ProfileEditForbidden),
            "listing_deleted" => Some(Flash::ListingDeleted),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::ProfileEditForbidden => PROFILE_EDIT_FORBIDDEN_MESSAGE,
            Flash::ListingDeleted => LISTING_DELETED_MESSAGE,
        }
    }

    /// Whether the message reports a failure (styles the banner)
    pub fn is_error(self) -> bool {
        matches!(self, Flash::ProfileEditForbidden)
    }

    pub fn cookie(self) -> Cookie<'static> {
        Cookie::build((FLASH_COOKIE_NAME, self.code()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    pub fn removal() -> Cookie<'static> {
        Cookie::build(FLASH_COOKIE_NAME).path("/").build()
    }
}
