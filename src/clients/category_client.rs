//! # Category Client

use super::unbox;
use crate::category_actor::{CategoryAction, CategoryError};
use crate::model::{Category, CategoryDraft, CategoryFilter, CategoryId, CategoryPatch};
use async_trait::async_trait;
use grocer_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct CategoryClient {
    inner: StoreClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: StoreClient<Category>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_category(&self, draft: CategoryDraft) -> Result<CategoryId, CategoryError> {
        debug!("Sending request");
        self.inner.create(draft).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Category, CategoryError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Closes the category to new products.
    #[instrument(skip(self))]
    pub async fn retire(&self, id: CategoryId) -> Result<(), CategoryError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, CategoryAction::Retire)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn reinstate(&self, id: CategoryId) -> Result<(), CategoryError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, CategoryAction::Reinstate)
            .await
            .map_err(Self::map_error)
    }

    /// The category routed to by `slug`, if any.
    #[instrument(skip(self))]
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, CategoryError> {
        let matches = self.list(Some(CategoryFilter::Slug(slug.to_string()))).await?;
        Ok(matches.into_iter().next())
    }

    /// Every category, sorted by name.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Category>, CategoryError> {
        let mut categories = self.list(None).await?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[async_trait]
impl RecordClient<Category> for CategoryClient {
    type Error = CategoryError;

    fn inner(&self) -> &StoreClient<Category> {
        &self.inner
    }

    fn map_error(e: StoreError) -> CategoryError {
        match e {
            StoreError::NotFound(id) => CategoryError::NotFound(id),
            StoreError::Conflict(slug) => CategoryError::DuplicateSlug(slug),
            StoreError::Record(e) => unbox(e).unwrap_or_else(CategoryError::Rejected),
            other => CategoryError::Store(other.to_string()),
        }
    }
}
