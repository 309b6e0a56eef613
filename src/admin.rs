//! # Admin Console
//!
//! The operations behind the admin panel: catalog upkeep, offers, service areas and
//! order fulfilment. Each call goes straight to the owning store; validation lives in the
//! records themselves.

use crate::area_actor::AreaError;
use crate::category_actor::CategoryError;
use crate::clients::{AreaClient, CategoryClient, OfferClient, OrderClient, ProductClient};
use crate::model::{
    AreaDraft, AreaId, AreaPatch, Category, CategoryDraft, CategoryId, CategoryPatch, Offer,
    OfferDraft, OfferId, OfferPatch, Order, OrderId, OrderStatus, Product, ProductDraft,
    ProductId, ProductPatch, ServiceArea,
};
use crate::offer_actor::OfferError;
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use grocer_store::RecordClient;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    /// A category cannot be deleted while products still point at it.
    #[error("Category {category_id} still has {products} products")]
    CategoryInUse {
        category_id: CategoryId,
        products: usize,
    },

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Offer(#[from] OfferError),

    #[error(transparent)]
    Area(#[from] AreaError),
}

#[derive(Clone)]
pub struct AdminConsole {
    categories: CategoryClient,
    products: ProductClient,
    orders: OrderClient,
    offers: OfferClient,
    areas: AreaClient,
}

impl AdminConsole {
    pub fn new(
        categories: CategoryClient,
        products: ProductClient,
        orders: OrderClient,
        offers: OfferClient,
        areas: AreaClient,
    ) -> Self {
        Self {
            categories,
            products,
            orders,
            offers,
            areas,
        }
    }

    // ---- catalog ----

    pub async fn create_category(&self, draft: CategoryDraft) -> Result<CategoryId, AdminError> {
        Ok(self.categories.create_category(draft).await?)
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Category, AdminError> {
        Ok(self.categories.update_category(id, patch).await?)
    }

    /// Deletes a category that has no products.
    ///
    /// The category is retired before products are counted, so a product created
    /// concurrently is either counted here or refused by the product store.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), AdminError> {
        self.categories.retire(id).await?;
        let products = match self.products.in_category(id).await {
            Ok(products) => products.len(),
            Err(e) => {
                self.categories.reinstate(id).await?;
                return Err(e.into());
            }
        };
        if products > 0 {
            self.categories.reinstate(id).await?;
            return Err(AdminError::CategoryInUse {
                category_id: id,
                products,
            });
        }
        self.categories.delete(id).await?;
        info!(%id, "Category deleted");
        Ok(())
    }

    pub async fn create_product(&self, draft: ProductDraft) -> Result<ProductId, AdminError> {
        Ok(self.products.create_product(draft).await?)
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, AdminError> {
        Ok(self.products.update_product(id, patch).await?)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), AdminError> {
        Ok(self.products.delete(id).await?)
    }

    /// Adds delivered units. Returns the new stock level.
    pub async fn restock(&self, id: ProductId, quantity: u32) -> Result<u32, AdminError> {
        Ok(self.products.restock(id, quantity).await?)
    }

    // ---- offers ----

    pub async fn create_offer(&self, draft: OfferDraft) -> Result<OfferId, AdminError> {
        Ok(self.offers.create_offer(draft).await?)
    }

    pub async fn update_offer(&self, id: OfferId, patch: OfferPatch) -> Result<Offer, AdminError> {
        Ok(self.offers.update_offer(id, patch).await?)
    }

    pub async fn deactivate_offer(&self, id: OfferId) -> Result<Offer, AdminError> {
        let patch = OfferPatch {
            active: Some(false),
            ..OfferPatch::default()
        };
        Ok(self.offers.update_offer(id, patch).await?)
    }

    pub async fn offers(&self) -> Result<Vec<Offer>, AdminError> {
        Ok(self.offers.list(None).await?)
    }

    // ---- service areas ----

    pub async fn create_area(&self, draft: AreaDraft) -> Result<AreaId, AdminError> {
        Ok(self.areas.create_area(draft).await?)
    }

    pub async fn update_area(
        &self,
        id: AreaId,
        patch: AreaPatch,
    ) -> Result<ServiceArea, AdminError> {
        Ok(self.areas.update_area(id, patch).await?)
    }

    pub async fn areas(&self) -> Result<Vec<ServiceArea>, AdminError> {
        Ok(self.areas.list(None).await?)
    }

    // ---- orders ----

    /// Orders newest first, optionally only those in `status`.
    pub async fn orders(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, AdminError> {
        Ok(self.orders.by_status(status).await?)
    }

    #[instrument(skip(self))]
    pub async fn advance_order(
        &self,
        id: OrderId,
        next: OrderStatus,
    ) -> Result<OrderStatus, AdminError> {
        let status = self.orders.advance(id, next).await?;
        info!(%id, %status, "Order advanced");
        Ok(status)
    }

    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: OrderId) -> Result<OrderStatus, AdminError> {
        let status = self.orders.cancel(id).await?;
        info!(%id, "Order cancelled");
        Ok(status)
    }
}
