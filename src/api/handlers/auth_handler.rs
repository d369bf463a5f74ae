//! Authentication handlers: registration, login and logout.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::extractors::Viewer;
use crate::api::views::Page;
use crate::api::AppState;
use crate::config::{INVALID_CREDENTIALS_MESSAGE, SESSION_COOKIE_NAME};
use crate::errors::{AppError, AppResult};
use crate::forms::{LoginForm, RegistrationErrors, RegistrationForm};

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", post(logout))
}

fn registration_page(
    viewer: &Viewer,
    form: &RegistrationForm,
    errors: &RegistrationErrors,
) -> Page {
    Page::new("register.html", viewer)
        .with("user_form", &form.user)
        .with("profile_form", &form.profile)
        .with("user_errors", &errors.user)
        .with("profile_errors", &errors.profile)
}

/// Same page for every failed login, whatever the reason.
fn failed_login_page(viewer: &Viewer) -> Response {
    Page::new("login.html", viewer)
        .with("form", &LoginForm::default())
        .with("error", INVALID_CREDENTIALS_MESSAGE)
        .status(StatusCode::UNAUTHORIZED)
        .into_response()
}

/// Issue a session cookie for `user_id`, replacing whatever session the
/// browser held before.
async fn sign_in(state: &AppState, jar: CookieJar, user_id: uuid::Uuid) -> AppResult<Response> {
    let previous = jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string());
    let token = state.auth_service.start_session(user_id, previous).await?;

    Ok((jar.add(state.cookies.issue(token)), Redirect::to("/")).into_response())
}

pub async fn register_form(viewer: Viewer) -> Page {
    registration_page(
        &viewer,
        &RegistrationForm::default(),
        &RegistrationErrors::default(),
    )
}

/// Register a new user with their profile
pub async fn register(
    State(state): State<AppState>,
    viewer: Viewer,
    jar: CookieJar,
    Form(form): Form<RegistrationForm>,
) -> AppResult<Response> {
    let echo = form.without_passwords();

    let registration = match form.clean() {
        Ok(registration) => registration,
        Err(errors) => {
            return Ok(registration_page(&viewer, &echo, &errors)
                .status(StatusCode::UNPROCESSABLE_ENTITY)
                .into_response());
        }
    };

    let user = match state
        .auth_service
        .register(registration.account, registration.profile)
        .await
    {
        Ok(user) => user,
        Err(AppError::Validation(user_errors)) => {
            let errors = RegistrationErrors {
                user: user_errors,
                ..Default::default()
            };
            return Ok(registration_page(&viewer, &echo, &errors)
                .status(StatusCode::UNPROCESSABLE_ENTITY)
                .into_response());
        }
        Err(e) => return Err(e),
    };

    sign_in(&state, jar, user.id).await
}

pub async fn login_form(viewer: Viewer) -> Page {
    Page::new("login.html", &viewer).with("form", &LoginForm::default())
}

/// Log in with username and password
pub async fn login(
    State(state): State<AppState>,
    viewer: Viewer,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let Some((username, password)) = form.credentials() else {
        return Ok(failed_login_page(&viewer));
    };

    match state.auth_service.authenticate(username, password).await {
        Ok(user) => sign_in(&state, jar, user.id).await,
        Err(AppError::InvalidCredentials) => Ok(failed_login_page(&viewer)),
        Err(e) => Err(e),
    }
}

/// Log out, whether or not a session was open
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        if let Err(e) = state.auth_service.logout(cookie.value()).await {
            tracing::error!("Failed to revoke session: {}", e);
        }
    }

    (jar.remove(state.cookies.removal()), Redirect::to("/")).into_response()
}
