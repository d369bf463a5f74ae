//! Profile repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::profile;
use crate::domain::{Profile, ProfileDraft};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile owned by `user_id`
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Profile>>;

    /// Replace bio/avatar, creating the row if the user has none yet
    async fn update(&self, user_id: Uuid, draft: ProfileDraft) -> AppResult<Profile>;
}

pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let result = profile::Entity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Profile::from))
    }

    async fn update(&self, user_id: Uuid, draft: ProfileDraft) -> AppResult<Profile> {
        let now = chrono::Utc::now();
        let existing = profile::Entity::find()
            .filter(profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        let model = match existing {
            Some(model) => {
                let mut active: profile::ActiveModel = model.into();
                active.bio = Set(draft.bio);
                active.avatar_url = Set(draft.avatar_url);
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
            None => {
                profile::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    bio: Set(draft.bio),
                    avatar_url: Set(draft.avatar_url),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&self.db)
                .await?
            }
        };

        Ok(Profile::from(model))
    }
}
