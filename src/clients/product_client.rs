//! # Product Client
//!
//! CRUD plus the stock actions checkout and the order store rely on.

use super::unbox;
use crate::model::{CategoryId, Product, ProductDraft, ProductFilter, ProductId, ProductPatch};
use crate::product_actor::{ProductAction, ProductError};
use async_trait::async_trait;
use grocer_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProductClient {
    inner: StoreClient<Product>,
}

impl ProductClient {
    pub fn new(inner: StoreClient<Product>) -> Self {
        Self { inner }
    }

    /// Creates a product. Fails with [`ProductError::UnknownCategory`] if the category
    /// does not exist.
    #[instrument(skip(self))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(draft).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Products of one category, newest first.
    #[instrument(skip(self))]
    pub async fn in_category(&self, category_id: CategoryId) -> Result<Vec<Product>, ProductError> {
        let mut products = self.list(Some(ProductFilter::Category(category_id))).await?;
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    /// Units currently on hand.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        self.stock_action(id, ProductAction::CheckStock).await
    }

    /// Takes `quantity` units off the shelf. Returns what is left.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        self.stock_action(id, ProductAction::Reserve(quantity)).await
    }

    /// Puts reserved units back. Returns the new level.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        self.stock_action(id, ProductAction::Release(quantity)).await
    }

    #[instrument(skip(self))]
    pub async fn restock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        self.stock_action(id, ProductAction::Restock(quantity)).await
    }

    async fn stock_action(
        &self,
        id: ProductId,
        action: ProductAction,
    ) -> Result<u32, ProductError> {
        debug!(%id, ?action, "Sending stock action");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl RecordClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &StoreClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError) -> ProductError {
        match e {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            StoreError::Record(e) => unbox(e).unwrap_or_else(ProductError::Rejected),
            other => ProductError::Store(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_store::mock::{create_mock_client, expect_action};

    #[tokio::test]
    async fn test_check_stock_returns_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::CheckStock);
        responder.send(Ok(42)).unwrap();

        assert_eq!(task.await.unwrap(), Ok(42));
    }

    #[tokio::test]
    async fn test_reserve_stock_surfaces_insufficient_stock() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.reserve_stock(ProductId(3), 100).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(action, ProductAction::Reserve(100));
        responder
            .send(Err(StoreError::Record(Box::new(ProductError::InsufficientStock {
                requested: 100,
                available: 7,
            }))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::InsufficientStock {
                requested: 100,
                available: 7
            })
        );
    }

    #[tokio::test]
    async fn test_closed_store_maps_to_store_error() {
        let (client, receiver) = create_mock_client::<Product>(1);
        drop(receiver);
        let products = ProductClient::new(client);

        let result = products.restock(ProductId(1), 5).await;
        assert!(matches!(result, Err(ProductError::Store(_))));
    }
}
