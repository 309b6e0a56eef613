//! [`DataGateway`] over the in-process record stores.

use super::{DataGateway, GatewayError};
use crate::clients::{CategoryClient, ProductClient};
use crate::model::{Category, CategoryId, Product};
use async_trait::async_trait;
use grocer_store::RecordClient;
use tracing::instrument;

#[derive(Clone)]
pub struct StoreGateway {
    categories: CategoryClient,
    products: ProductClient,
}

impl StoreGateway {
    pub fn new(categories: CategoryClient, products: ProductClient) -> Self {
        Self {
            categories,
            products,
        }
    }
}

fn unavailable(e: impl std::fmt::Display) -> GatewayError {
    GatewayError::Unavailable(e.to_string())
}

fn newest_first(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    products
}

#[async_trait]
impl DataGateway for StoreGateway {
    #[instrument(skip(self))]
    async fn list_categories(&self) -> Result<Vec<Category>, GatewayError> {
        self.categories.all().await.map_err(unavailable)
    }

    #[instrument(skip(self))]
    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, GatewayError> {
        self.categories.find_by_slug(slug).await.map_err(unavailable)
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, GatewayError> {
        self.products
            .list(None)
            .await
            .map(newest_first)
            .map_err(unavailable)
    }

    #[instrument(skip(self))]
    async fn list_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, GatewayError> {
        self.products.in_category(category_id).await.map_err(unavailable)
    }
}
