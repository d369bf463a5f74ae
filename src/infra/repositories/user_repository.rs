//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr, TransactionTrait,
};
use uuid::Uuid;

use super::entities::{profile, user};
use crate::config::USERNAME_TAKEN_MESSAGE;
use crate::domain::{NewUser, Profile, ProfileDraft, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a user and its profile atomically.
    ///
    /// A taken username comes back as a `username` field error.
    async fn create_with_profile(
        &self,
        user: NewUser,
        profile: ProfileDraft,
    ) -> AppResult<(User, Profile)>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create_with_profile(
        &self,
        new_user: NewUser,
        draft: ProfileDraft,
    ) -> AppResult<(User, Profile)> {
        let txn = self.db.begin().await.map_err(AppError::from)?;
        let now = chrono::Utc::now();
        let user_id = Uuid::new_v4();

        let inserted = async {
            let user_model = user::ActiveModel {
                id: Set(user_id),
                username: Set(new_user.username),
                email: Set(new_user.email),
                password_hash: Set(new_user.password_hash),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(unique_username)?;

            let profile_model = profile::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(user_id),
                bio: Set(draft.bio),
                avatar_url: Set(draft.avatar_url),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await
            .map_err(AppError::from)?;

            Ok::<_, AppError>((User::from(user_model), Profile::from(profile_model)))
        }
        .await;

        match inserted {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// A concurrent registration may win the race past the pre-insert check;
/// the unique index then reports it here.
fn unique_username(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::field("username", USERNAME_TAKEN_MESSAGE)
        }
        _ => AppError::from(e),
    }
}
