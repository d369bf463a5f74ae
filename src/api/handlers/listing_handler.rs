//! Listing handlers: index/search, detail, create, edit, delete.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::extractors::{Authenticated, Viewer};
use crate::api::flash::Flash;
use crate::api::views::Page;
use crate::api::AppState;
use crate::domain::SearchQuery;
use crate::errors::{AppError, AppResult};
use crate::forms::{FormErrors, ListingForm};

/// `?q=` on the index page
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Publicly readable listing routes
pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/listings/:id/", get(detail))
}

/// Routes that need a logged-in seller
pub fn listing_owner_routes() -> Router<AppState> {
    Router::new()
        .route("/listings/new", get(new_form).post(create))
        .route("/listings/:id/edit", get(edit_form).post(update))
        .route("/listings/:id/delete", get(confirm_delete).post(delete))
}

/// Malformed ids are just another missing listing.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}

fn form_page(
    viewer: &Viewer,
    heading: &str,
    action: &str,
    form: &ListingForm,
    errors: &FormErrors,
) -> Page {
    Page::new("listing_form.html", viewer)
        .with("heading", heading)
        .with("action", action)
        .with("form", form)
        .with("errors", errors)
}

/// Listing index, optionally filtered by `q`
pub async fn index(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(params): Query<SearchParams>,
) -> AppResult<Page> {
    let query = SearchQuery::parse(params.q.as_deref());
    let echoed = query.as_ref().map(SearchQuery::as_str).unwrap_or_default().to_string();
    let listings = state.listing_service.search(query).await?;

    Ok(Page::new("home.html", &viewer)
        .with("listings", &listings)
        .with("q", &echoed))
}

pub async fn detail(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let listing = state.listing_service.get(parse_id(&id)?).await?;
    let is_owner = viewer.is(listing.seller_id);

    Ok(Page::new("listing_detail.html", &viewer)
        .with("listing", &listing)
        .with("is_owner", &is_owner))
}

pub async fn new_form(viewer: Viewer) -> Page {
    form_page(
        &viewer,
        "New listing",
        "/listings/new",
        &ListingForm::default(),
        &FormErrors::new(),
    )
}

pub async fn create(
    State(state): State<AppState>,
    viewer: Viewer,
    Authenticated(user): Authenticated,
    Form(form): Form<ListingForm>,
) -> AppResult<Response> {
    let draft = match form.clone().clean() {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(form_page(&viewer, "New listing", "/listings/new", &form, &errors)
                .status(StatusCode::UNPROCESSABLE_ENTITY)
                .into_response());
        }
    };

    state.listing_service.create(user.id, draft).await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn edit_form(
    State(state): State<AppState>,
    viewer: Viewer,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let id = parse_id(&id)?;
    let listing = state.listing_service.get_owned(id, user.id).await?;
    let action = format!("/listings/{}/edit", id);

    Ok(form_page(
        &viewer,
        "Edit listing",
        &action,
        &ListingForm::from(&listing),
        &FormErrors::new(),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    viewer: Viewer,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
    Form(form): Form<ListingForm>,
) -> AppResult<Response> {
    let id = parse_id(&id)?;
    // Scoped lookup runs before the form is validated.
    state.listing_service.get_owned(id, user.id).await?;

    let draft = match form.clone().clean() {
        Ok(draft) => draft,
        Err(errors) => {
            let action = format!("/listings/{}/edit", id);
            return Ok(form_page(&viewer, "Edit listing", &action, &form, &errors)
                .status(StatusCode::UNPROCESSABLE_ENTITY)
                .into_response());
        }
    };

    state.listing_service.update(id, user.id, draft).await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn confirm_delete(
    State(state): State<AppState>,
    viewer: Viewer,
    Authenticated(user): Authenticated,
    Path(id): Path<String>,
) -> AppResult<Page> {
    let listing = state
        .listing_service
        .get_owned(parse_id(&id)?, user.id)
        .await?;

    Ok(Page::new("listing_confirm_delete.html", &viewer).with("listing", &listing))
}

pub async fn delete(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    jar: CookieJar,
    Path(id): Path<String>,
) -> AppResult<Response> {
    state.listing_service.delete(parse_id(&id)?, user.id).await?;

    Ok((jar.add(Flash::ListingDeleted.cookie()), Redirect::to("/")).into_response())
}
