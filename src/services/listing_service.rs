//! Listing service - search and seller-scoped CRUD.
//!
//! Reads are public. Writes go through the repository's owner-scoped
//! methods, so a listing sold by someone else reports `NotFound` exactly
//! like a missing one.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Listing, ListingDraft, SearchQuery};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait ListingService: Send + Sync {
    /// All listings, or those matching `query`
    async fn search(&self, query: Option<SearchQuery>) -> AppResult<Vec<Listing>>;

    async fn get(&self, id: Uuid) -> AppResult<Listing>;

    /// Listing `id` as seen by its seller; `NotFound` for anyone else
    async fn get_owned(&self, id: Uuid, seller_id: Uuid) -> AppResult<Listing>;

    async fn create(&self, seller_id: Uuid, draft: ListingDraft) -> AppResult<Listing>;

    async fn update(&self, id: Uuid, seller_id: Uuid, draft: ListingDraft) -> AppResult<Listing>;

    async fn delete(&self, id: Uuid, seller_id: Uuid) -> AppResult<()>;
}

pub struct ListingManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ListingManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ListingService for ListingManager<U> {
    async fn search(&self, query: Option<SearchQuery>) -> AppResult<Vec<Listing>> {
        match query {
            Some(query) => self.uow.listings().search(&query).await,
            None => self.uow.listings().list().await,
        }
    }

    async fn get(&self, id: Uuid) -> AppResult<Listing> {
        self.uow.listings().find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_owned(&self, id: Uuid, seller_id: Uuid) -> AppResult<Listing> {
        self.uow
            .listings()
            .find_owned(id, seller_id)
            .await?
            .ok_or_not_found()
    }

    async fn create(&self, seller_id: Uuid, draft: ListingDraft) -> AppResult<Listing> {
        let listing = self.uow.listings().create(seller_id, draft).await?;
        tracing::info!(listing_id = %listing.id, user_id = %seller_id, "Listing created");
        Ok(listing)
    }

    async fn update(&self, id: Uuid, seller_id: Uuid, draft: ListingDraft) -> AppResult<Listing> {
        let listing = self
            .uow
            .listings()
            .update_owned(id, seller_id, draft)
            .await?
            .ok_or_not_found()?;
        tracing::info!(listing_id = %id, user_id = %seller_id, "Listing updated");
        Ok(listing)
    }

    async fn delete(&self, id: Uuid, seller_id: Uuid) -> AppResult<()> {
        if !self.uow.listings().delete_owned(id, seller_id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(listing_id = %id, user_id = %seller_id, "Listing deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{ListingRepository, MockListingRepository, MockUnitOfWork};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn listing(id: Uuid, seller_id: Uuid, name: &str) -> Listing {
        let now = Utc::now();
        Listing {
            id,
            seller_id,
            seller_username: "alice".to_string(),
            name: name.to_string(),
            description: "Red mountain bike".to_string(),
            price_cents: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn draft(name: &str) -> ListingDraft {
        ListingDraft {
            name: name.to_string(),
            description: "Red mountain bike".to_string(),
            price_cents: Some(5000),
            image_url: None,
        }
    }

    fn service(repo: MockListingRepository) -> ListingManager<MockUnitOfWork> {
        let repo: Arc<dyn ListingRepository> = Arc::new(repo);
        let mut uow = MockUnitOfWork::new();
        uow.expect_listings().returning(move || repo.clone());
        ListingManager::new(Arc::new(uow))
    }

    #[tokio::test]
    async fn test_search_without_query_lists_everything() {
        let mut repo = MockListingRepository::new();
        repo.expect_list().times(1).returning(|| Ok(vec![]));
        repo.expect_search().never();

        let listings = service(repo).search(None).await.unwrap();
        assert!(listings.is_empty());
    }

    #[tokio::test]
    async fn test_search_with_query_uses_search() {
        let seller = Uuid::new_v4();
        let mut repo = MockListingRepository::new();
        repo.expect_list().never();
        repo.expect_search()
            .withf(|q| q.as_str() == "bike")
            .times(1)
            .returning(move |_| Ok(vec![listing(Uuid::new_v4(), seller, "Bike")]));

        let found = service(repo)
            .search(SearchQuery::parse(Some(" bike ")))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo).get(Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_not_found() {
        let id = Uuid::new_v4();
        let intruder = Uuid::new_v4();
        let mut repo = MockListingRepository::new();
        repo.expect_update_owned()
            .with(eq(id), eq(intruder), mockall::predicate::always())
            .returning(|_, _, _| Ok(None));

        let result = service(repo).update(id, intruder, draft("Stolen")).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_by_owner() {
        let id = Uuid::new_v4();
        let seller = Uuid::new_v4();
        let mut repo = MockListingRepository::new();
        repo.expect_update_owned()
            .with(eq(id), eq(seller), mockall::predicate::always())
            .returning(|id, seller, draft| {
                let mut updated = listing(id, seller, "Bike");
                updated.apply(draft);
                Ok(Some(updated))
            });

        let updated = service(repo).update(id, seller, draft("Faster bike")).await.unwrap();
        assert_eq!(updated.name, "Faster bike");
        assert_eq!(updated.price_cents, Some(5000));
    }

    #[tokio::test]
    async fn test_delete_reports_missing_as_not_found() {
        let mut repo = MockListingRepository::new();
        repo.expect_delete_owned().returning(|_, _| Ok(false));

        let result = service(repo).delete(Uuid::new_v4(), Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_sets_seller() {
        let seller = Uuid::new_v4();
        let mut repo = MockListingRepository::new();
        repo.expect_create()
            .with(eq(seller), mockall::predicate::always())
            .times(1)
            .returning(|seller, draft| {
                let mut created = listing(Uuid::new_v4(), seller, "");
                created.apply(draft);
                Ok(created)
            });

        let created = service(repo).create(seller, draft("Bike")).await.unwrap();
        assert_eq!(created.seller_id, seller);
        assert!(created.is_sold_by(seller));
    }
}
