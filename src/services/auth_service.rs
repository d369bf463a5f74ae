//! Authentication service - registration, login and sessions.
//!
//! Password hashing lives in the domain `Password` value object; session
//! tokens live in the `SessionStore`. This service ties both to the users
//! repository.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::USERNAME_TAKEN_MESSAGE;
use crate::domain::{CurrentUser, NewAccount, NewUser, Password, ProfileDraft, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{SessionStore, UnitOfWork};

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a user together with its profile
    async fn register(&self, account: NewAccount, profile: ProfileDraft) -> AppResult<User>;

    /// Check credentials. Every failure is the same `InvalidCredentials`.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<User>;

    /// Open a session for `user_id`, revoking `previous` first if given.
    async fn start_session(&self, user_id: Uuid, previous: Option<String>) -> AppResult<String>;

    /// Revoke a session token
    async fn logout(&self, token: &str) -> AppResult<()>;

    /// Caller identity behind a session token, if it is still live
    async fn resolve_session(&self, token: &str) -> AppResult<Option<CurrentUser>>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    sessions: Arc<dyn SessionStore>,
}

impl<U: UnitOfWork> Authenticator<U> {
    /// Create new auth service instance with Unit of Work
    pub fn new(uow: Arc<U>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { uow, sessions }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, account: NewAccount, profile: ProfileDraft) -> AppResult<User> {
        if self
            .uow
            .users()
            .find_by_username(&account.username)
            .await?
            .is_some()
        {
            return Err(AppError::field("username", USERNAME_TAKEN_MESSAGE));
        }

        let password_hash = Password::new(&account.password)?.into_string();
        let new_user = NewUser {
            username: account.username,
            email: account.email,
            password_hash,
        };

        let (user, _profile) = self.uow.users().create_with_profile(new_user, profile).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.uow.users().find_by_username(username).await?;

        // Verify against a dummy hash when the user is unknown so both
        // failure paths cost one Argon2 run.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(password);

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(user)
            }
            _ => {
                tracing::warn!("Failed login attempt");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn start_session(&self, user_id: Uuid, previous: Option<String>) -> AppResult<String> {
        if let Some(previous) = previous {
            self.sessions.destroy(&previous).await?;
        }
        self.sessions.create(user_id).await
    }

    async fn logout(&self, token: &str) -> AppResult<()> {
        self.sessions.destroy(token).await?;
        tracing::info!("Session closed");
        Ok(())
    }

    async fn resolve_session(&self, token: &str) -> AppResult<Option<CurrentUser>> {
        let Some(user_id) = self.sessions.resolve(token).await? else {
            return Ok(None);
        };

        let user = self.uow.users().find_by_id(user_id).await?;
        Ok(user.as_ref().map(CurrentUser::from))
    }
}
