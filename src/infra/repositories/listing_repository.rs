//! Listing repository implementation.
//!
//! Every mutation is scoped by `(id, seller_id)`: a listing that exists but
//! belongs to someone else is indistinguishable from one that doesn't exist.

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Condition, Expr, Func, LikeExpr},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteMany, EntityTrait, QueryFilter,
    QueryOrder, Select, Set,
};
use uuid::Uuid;

use super::entities::{listing, user};
use crate::domain::{Listing, ListingDraft, SearchQuery};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// All listings, oldest first
    async fn list(&self) -> AppResult<Vec<Listing>>;

    /// Listings whose name or description contains the query, ignoring case
    async fn search(&self, query: &SearchQuery) -> AppResult<Vec<Listing>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>>;

    /// Listing `id` only if `seller_id` sells it
    async fn find_owned(&self, id: Uuid, seller_id: Uuid) -> AppResult<Option<Listing>>;

    async fn list_by_seller(&self, seller_id: Uuid) -> AppResult<Vec<Listing>>;

    async fn create(&self, seller_id: Uuid, draft: ListingDraft) -> AppResult<Listing>;

    /// `None` when the listing is missing or not owned
    async fn update_owned(
        &self,
        id: Uuid,
        seller_id: Uuid,
        draft: ListingDraft,
    ) -> AppResult<Option<Listing>>;

    /// `false` when the listing is missing or not owned
    async fn delete_owned(&self, id: Uuid, seller_id: Uuid) -> AppResult<bool>;
}

pub struct ListingStore {
    db: DatabaseConnection,
}

impl ListingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn ordered() -> Select<listing::Entity> {
        listing::Entity::find()
            .order_by_asc(listing::Column::CreatedAt)
            .order_by_asc(listing::Column::Id)
    }

    /// Case-insensitive substring match on name OR description
    fn matching(query: &SearchQuery) -> Select<listing::Entity> {
        let pattern = query.like_pattern();
        let contains = |column: listing::Column| {
            Expr::expr(Func::lower(Expr::col((listing::Entity, column))))
                .like(LikeExpr::new(pattern.clone()).escape('\\'))
        };

        Self::ordered().filter(
            Condition::any()
                .add(contains(listing::Column::Name))
                .add(contains(listing::Column::Description)),
        )
    }

    /// Scoped lookup: primary key AND seller
    fn owned(id: Uuid, seller_id: Uuid) -> Select<listing::Entity> {
        listing::Entity::find_by_id(id).filter(listing::Column::SellerId.eq(seller_id))
    }

    fn delete_owned_query(id: Uuid, seller_id: Uuid) -> DeleteMany<listing::Entity> {
        listing::Entity::delete_many()
            .filter(listing::Column::Id.eq(id))
            .filter(listing::Column::SellerId.eq(seller_id))
    }

    async fn all_with_seller(&self, select: Select<listing::Entity>) -> AppResult<Vec<Listing>> {
        let rows = select
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(model, seller)| model.into_listing(seller))
            .collect())
    }

    async fn one_with_seller(
        &self,
        select: Select<listing::Entity>,
    ) -> AppResult<Option<Listing>> {
        let row = select
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(|(model, seller)| model.into_listing(seller)))
    }
}

#[async_trait]
impl ListingRepository for ListingStore {
    async fn list(&self) -> AppResult<Vec<Listing>> {
        self.all_with_seller(Self::ordered()).await
    }

    async fn search(&self, query: &SearchQuery) -> AppResult<Vec<Listing>> {
        self.all_with_seller(Self::matching(query)).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Listing>> {
        self.one_with_seller(listing::Entity::find_by_id(id)).await
    }

    async fn find_owned(&self, id: Uuid, seller_id: Uuid) -> AppResult<Option<Listing>> {
        self.one_with_seller(Self::owned(id, seller_id)).await
    }

    async fn list_by_seller(&self, seller_id: Uuid) -> AppResult<Vec<Listing>> {
        let select = Self::ordered().filter(listing::Column::SellerId.eq(seller_id));
        self.all_with_seller(select).await
    }

    async fn create(&self, seller_id: Uuid, draft: ListingDraft) -> AppResult<Listing> {
        let now = chrono::Utc::now();
        let model = listing::ActiveModel {
            id: Set(Uuid::new_v4()),
            seller_id: Set(seller_id),
            name: Set(draft.name),
            description: Set(draft.description),
            price_cents: Set(draft.price_cents),
            image_url: Set(draft.image_url),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(AppError::from)?;

        let seller = user::Entity::find_by_id(seller_id).one(&self.db).await?;
        Ok(model.into_listing(seller))
    }

    async fn update_owned(
        &self,
        id: Uuid,
        seller_id: Uuid,
        draft: ListingDraft,
    ) -> AppResult<Option<Listing>> {
        let row = Self::owned(id, seller_id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        let Some((model, seller)) = row else {
            return Ok(None);
        };

        let mut active: listing::ActiveModel = model.into();
        active.name = Set(draft.name);
        active.description = Set(draft.description);
        active.price_cents = Set(draft.price_cents);
        active.image_url = Set(draft.image_url);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Some(model.into_listing(seller)))
    }

    async fn delete_owned(&self, id: Uuid, seller_id: Uuid) -> AppResult<bool> {
        let result = Self::delete_owned_query(id, seller_id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
