//! Profile handlers: public profile page and owner-only edit.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::extractors::{Authenticated, Viewer};
use crate::api::flash::Flash;
use crate::api::views::Page;
use crate::api::AppState;
use crate::domain::{CurrentUser, Profile};
use crate::errors::{AppError, AppResult};
use crate::forms::{FormErrors, ProfileForm};

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/users/:username/", get(show))
}

pub fn profile_owner_routes() -> Router<AppState> {
    Router::new().route("/users/:username/edit", get(edit_form).post(update))
}

/// Path to a user's profile page
pub fn profile_path(username: &str) -> String {
    format!("/users/{}/", urlencoding::encode(username))
}

/// Load the profile `caller` wants to edit, or the response that replaces
/// the edit page: 404 for an unknown user, a flash + redirect to the
/// caller's own profile for anyone else's.
async fn editable(
    state: &AppState,
    jar: CookieJar,
    caller: &CurrentUser,
    username: &str,
) -> AppResult<Result<Profile, Response>> {
    match state.profile_service.editable_profile(caller, username).await {
        Ok(profile) => Ok(Ok(profile)),
        Err(AppError::Forbidden) => {
            let redirect = Redirect::to(&profile_path(&caller.username));
            Ok(Err((jar.add(Flash::ProfileEditForbidden.cookie()), redirect).into_response()))
        }
        Err(e) => Err(e),
    }
}

fn edit_page(viewer: &Viewer, username: &str, form: &ProfileForm, errors: &FormErrors) -> Page {
    Page::new("profile_edit.html", viewer)
        .with("username", username)
        .with("form", form)
        .with("errors", errors)
}

/// Public profile with the user's listings
pub async fn show(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(username): Path<String>,
) -> AppResult<Page> {
    let page = state.profile_service.profile_page(&username).await?;
    let is_owner = viewer.is(page.user.id);

    Ok(Page::new("profile.html", &viewer)
        .with("owner", &page.user)
        .with("profile", &page.profile)
        .with("listings", &page.listings)
        .with("is_owner", &is_owner))
}

pub async fn edit_form(
    State(state): State<AppState>,
    viewer: Viewer,
    Authenticated(user): Authenticated,
    jar: CookieJar,
    Path(username): Path<String>,
) -> AppResult<Response> {
    let profile = match editable(&state, jar, &user, &username).await? {
        Ok(profile) => profile,
        Err(response) => return Ok(response),
    };

    Ok(edit_page(&viewer, &username, &ProfileForm::from(&profile), &FormErrors::new()).into_response())
}

pub async fn update(
    State(state): State<AppState>,
    viewer: Viewer,
    Authenticated(user): Authenticated,
    jar: CookieJar,
    Path(username): Path<String>,
    Form(form): Form<ProfileForm>,
) -> AppResult<Response> {
    if let Err(response) = editable(&state, jar, &user, &username).await? {
        return Ok(response);
    }

    let draft = match form.clone().clean() {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(edit_page(&viewer, &username, &form, &errors)
                .status(StatusCode::UNPROCESSABLE_ENTITY)
                .into_response());
        }
    };

    state.profile_service.update_profile(user.id, draft).await?;
    Ok(Redirect::to(&profile_path(&user.username)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_path() {
        assert_eq!(profile_path("alice"), "/users/alice/");
        assert_eq!(profile_path("a.l+i-c_e@x"), "/users/a.l%2Bi-c_e%40x/");
        assert_eq!(profile_path("zoë"), "/users/zo%C3%AB/");
    }
}
