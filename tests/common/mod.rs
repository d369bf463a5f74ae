//! Shared test harness: the real router over in-memory storage.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use chrono::Utc;
use once_cell::sync::Lazy;
use tower::ServiceExt;
use uuid::Uuid;

use classifieds::api::{create_router, AppState, SessionCookies};
use classifieds::domain::{
    Listing, ListingDraft, NewUser, Password, Profile, ProfileDraft, SearchQuery, User,
};
use classifieds::errors::{AppError, AppResult};
use classifieds::infra::session_store::generate_token;
use classifieds::infra::{
    ListingRepository, ProfileRepository, SessionStore, UnitOfWork, UserRepository,
};
use classifieds::services::Services;

pub const PASSWORD: &str = "correct-horse-battery";

/// Hashing is slow in debug builds; seeded users share one hash.
static PASSWORD_HASH: Lazy<String> = Lazy::new(|| {
    Password::new(PASSWORD)
        .expect("test password hashes")
        .into_string()
});

// =============================================================================
// In-memory storage
// =============================================================================

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<Profile>,
    listings: Vec<Listing>,
}

/// Unit of Work backed by vectors behind a mutex.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn profile_count(&self) -> usize {
        self.tables.lock().unwrap().profiles.len()
    }

    pub fn listing(&self, id: Uuid) -> Option<Listing> {
        let tables = self.tables.lock().unwrap();
        tables.listings.iter().find(|l| l.id == id).cloned()
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.tables.lock().unwrap().listings.clone()
    }

    pub fn profile_of(&self, user_id: Uuid) -> Option<Profile> {
        let tables = self.tables.lock().unwrap();
        tables.profiles.iter().find(|p| p.user_id == user_id).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_with_profile(
        &self,
        new_user: NewUser,
        profile: ProfileDraft,
    ) -> AppResult<(User, Profile)> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == new_user.username) {
            return Err(AppError::field(
                "username",
                "A user with that username already exists.",
            ));
        }

        let user = User::new(
            Uuid::new_v4(),
            new_user.username,
            new_user.email,
            new_user.password_hash,
        );
        let mut created = Profile::empty(user.id);
        created.id = Uuid::new_v4();
        created.apply(profile);

        tables.users.push(user.clone());
        tables.profiles.push(created.clone());
        Ok((user, created))
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        Ok(self.profile_of(user_id))
    }

    async fn update(&self, user_id: Uuid, draft: ProfileDraft) -> AppResult<Profile> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(profile) = tables.profiles.iter_mut().find(|p| p.user_id == user_id) {
            profile.apply(draft);
            return Ok(profile.clone());
        }

        let mut profile = Profile::empty(user_id);
        profile.id = Uuid::new_v4();
        profile.apply(draft);
        tables.profiles.push(profile.clone());
        Ok(profile)
    }
}

#[async_trait]
impl ListingRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Listing>> {
        Ok(self.listings())
    }

    async fn search(&self, query: &SearchQuery) -> AppResult<Vec<Listing>> {
        Ok(self
            .listings()
            .into_iter()
            .filter(|l| l.matches(query))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>> {
        Ok(self.listing(id))
    }

    async fn find_owned(&self, id: Uuid, seller_id: Uuid) -> AppResult<Option<Listing>> {
        Ok(self.listing(id).filter(|l| l.is_sold_by(seller_id)))
    }

    async fn list_by_seller(&self, seller_id: Uuid) -> AppResult<Vec<Listing>> {
        Ok(self
            .listings()
            .into_iter()
            .filter(|l| l.is_sold_by(seller_id))
            .collect())
    }

    async fn create(&self, seller_id: Uuid, draft: ListingDraft) -> AppResult<Listing> {
        let mut tables = self.tables.lock().unwrap();
        let seller_username = tables
            .users
            .iter()
            .find(|u| u.id == seller_id)
            .map(|u| u.username.clone())
            .unwrap_or_default();

        let now = Utc::now();
        let listing = Listing {
            id: Uuid::new_v4(),
            seller_id,
            seller_username,
            name: draft.name,
            description: draft.description,
            price_cents: draft.price_cents,
            image_url: draft.image_url,
            created_at: now,
            updated_at: now,
        };
        tables.listings.push(listing.clone());
        Ok(listing)
    }

    async fn update_owned(
        &self,
        id: Uuid,
        seller_id: Uuid,
        draft: ListingDraft,
    ) -> AppResult<Option<Listing>> {
        let mut tables = self.tables.lock().unwrap();
        let Some(listing) = tables
            .listings
            .iter_mut()
            .find(|l| l.id == id && l.is_sold_by(seller_id))
        else {
            return Ok(None);
        };
        listing.apply(draft);
        Ok(Some(listing.clone()))
    }

    async fn delete_owned(&self, id: Uuid, seller_id: Uuid) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.listings.len();
        tables
            .listings
            .retain(|l| !(l.id == id && l.is_sold_by(seller_id)));
        Ok(tables.listings.len() != before)
    }
}

impl UnitOfWork for MemoryStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(self.clone())
    }

    fn profiles(&self) -> Arc<dyn ProfileRepository> {
        Arc::new(self.clone())
    }

    fn listings(&self) -> Arc<dyn ListingRepository> {
        Arc::new(self.clone())
    }
}

/// Session store backed by a map.
#[derive(Default)]
pub struct MemorySessions {
    sessions: Mutex<HashMap<String, Uuid>>,
}

impl MemorySessions {
    pub fn is_live(&self, token: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(token)
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn create(&self, user_id: Uuid) -> AppResult<String> {
        let token = generate_token();
        self.sessions.lock().unwrap().insert(token.clone(), user_id);
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> AppResult<Option<Uuid>> {
        Ok(self.sessions.lock().unwrap().get(token).copied())
    }

    async fn destroy(&self, token: &str) -> AppResult<()> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }
}

// =============================================================================
// Application harness
// =============================================================================

pub struct TestApp {
    router: Router,
    pub store: MemoryStore,
    pub sessions: Arc<MemorySessions>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::default();
        let sessions = Arc::new(MemorySessions::default());

        let services = Services::from_unit_of_work(Arc::new(store.clone()), sessions.clone());
        let cookies = SessionCookies {
            ttl_seconds: 3600,
            secure: false,
        };
        let router = create_router(AppState::from_services(&services, cookies));

        Self {
            router,
            store,
            sessions,
        }
    }

    /// Insert a user (with profile) directly, bypassing the HTTP flow.
    pub async fn seed_user(&self, username: &str) -> User {
        let new_user = NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: PASSWORD_HASH.clone(),
        };
        let (user, _) = self
            .store
            .create_with_profile(new_user, ProfileDraft::default())
            .await
            .unwrap();
        user
    }

    /// Open a session for `user` and return the cookie header value.
    pub async fn session_for(&self, user: &User) -> String {
        let token = self.sessions.create(user.id).await.unwrap();
        format!("sessionid={}", token)
    }

    pub async fn seed_listing(&self, seller: &User, name: &str, description: &str) -> Listing {
        self.store
            .create(
                seller.id,
                ListingDraft {
                    name: name.to_string(),
                    description: description.to_string(),
                    price_cents: Some(1000),
                    image_url: None,
                },
            )
            .await
            .unwrap()
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::from(encode_form(fields))).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

// =============================================================================
// Response helpers
// =============================================================================

pub fn encode_form(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string())
}

/// `name=value` of the first Set-Cookie for `name`, attributes stripped.
pub fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
}

pub fn assert_redirect(response: &Response<Body>, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response).as_deref(), Some(to));
}
