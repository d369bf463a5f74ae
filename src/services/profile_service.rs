//! Profile service - public profile pages and owner-only edits.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{CurrentUser, Listing, Profile, ProfileDraft, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Everything the public profile page shows
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub user: User,
    pub profile: Profile,
    pub listings: Vec<Listing>,
}

#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Public page for `username`
    async fn profile_page(&self, username: &str) -> AppResult<ProfilePage>;

    /// Profile of `username`, if `caller` is allowed to edit it.
    ///
    /// `NotFound` for an unknown username, `Forbidden` for anyone but the
    /// owner.
    async fn editable_profile(&self, caller: &CurrentUser, username: &str) -> AppResult<Profile>;

    /// Replace the caller's bio and avatar
    async fn update_profile(&self, user_id: Uuid, draft: ProfileDraft) -> AppResult<Profile>;
}

pub struct ProfileManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProfileManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn profile_of(&self, user_id: Uuid) -> AppResult<Profile> {
        let profile = self.uow.profiles().find_by_user_id(user_id).await?;
        Ok(profile.unwrap_or_else(|| Profile::empty(user_id)))
    }
}

#[async_trait]
impl<U: UnitOfWork> ProfileService for ProfileManager<U> {
    async fn profile_page(&self, username: &str) -> AppResult<ProfilePage> {
        let user = self
            .uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or_not_found()?;

        let listings = self.uow.listings();
        let (profile, listings) =
            tokio::try_join!(self.profile_of(user.id), listings.list_by_seller(user.id))?;

        Ok(ProfilePage {
            user,
            profile,
            listings,
        })
    }

    async fn editable_profile(&self, caller: &CurrentUser, username: &str) -> AppResult<Profile> {
        let owner = self
            .uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or_not_found()?;

        if !owner.is(caller.id) {
            tracing::warn!(
                user_id = %caller.id,
                target = %owner.username,
                "Attempt to edit another user's profile"
            );
            return Err(AppError::Forbidden);
        }

        self.profile_of(owner.id).await
    }

    async fn update_profile(&self, user_id: Uuid, draft: ProfileDraft) -> AppResult<Profile> {
        let profile = self.uow.profiles().update(user_id, draft).await?;
        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(profile)
    }
}
