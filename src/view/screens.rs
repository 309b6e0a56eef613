//! Fetch plans for the storefront and admin screens.
//!
//! | Screen | Key | Loads |
//! |---|---|---|
//! | [`HomeScreen`] | `()` | categories and products, concurrently |
//! | [`CategoryScreen`] | slug | category by slug, then its products |
//! | [`CatalogScreen`] | `()` | every product |
//! | [`OrdersScreen`] | optional status | orders, newest first |
//! | [`OrderConfirmationScreen`] | order id | one order |

use super::controller::FetchPlan;
use super::state::ViewError;
use super::transform::{filter_by_category, select_most_stocked, select_on_sale};
use crate::clients::OrderClient;
use crate::gateway::{DataGateway, GatewayError};
use crate::model::{Category, Order, OrderId, OrderStatus, Product};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use grocer_store::RecordClient;
use std::sync::Arc;

impl From<GatewayError> for ViewError {
    fn from(e: GatewayError) -> Self {
        ViewError::Transient(e.to_string())
    }
}

impl From<OrderError> for ViewError {
    fn from(e: OrderError) -> Self {
        match e {
            OrderError::NotFound(id) => ViewError::NotFound(id),
            other => ViewError::Transient(other.to_string()),
        }
    }
}

// =============================================================================
// HOME
// =============================================================================

pub struct HomeScreen {
    gateway: Arc<dyn DataGateway>,
}

impl HomeScreen {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeData {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl HomeData {
    pub fn on_sale(&self) -> Vec<Product> {
        select_on_sale(&self.products)
    }

    pub fn most_stocked(&self) -> Vec<Product> {
        select_most_stocked(&self.products)
    }
}

#[async_trait]
impl FetchPlan for HomeScreen {
    type Key = ();
    type Data = HomeData;
    const SCREEN: &'static str = "home";

    async fn fetch(&self, _key: ()) -> Result<HomeData, ViewError> {
        let (categories, products) = tokio::try_join!(
            self.gateway.list_categories(),
            self.gateway.list_products()
        )?;
        Ok(HomeData {
            categories,
            products,
        })
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Category page, keyed by the slug from the route.
pub struct CategoryScreen {
    gateway: Arc<dyn DataGateway>,
}

impl CategoryScreen {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryData {
    pub category: Category,
    pub products: Vec<Product>,
}

impl CategoryData {
    pub fn on_sale(&self) -> Vec<Product> {
        select_on_sale(&self.products)
    }

    pub fn most_stocked(&self) -> Vec<Product> {
        select_most_stocked(&self.products)
    }
}

#[async_trait]
impl FetchPlan for CategoryScreen {
    type Key = String;
    type Data = CategoryData;
    const SCREEN: &'static str = "category";

    fn accepts(&self, slug: &String) -> bool {
        !slug.trim().is_empty()
    }

    async fn fetch(&self, slug: String) -> Result<CategoryData, ViewError> {
        let category = self
            .gateway
            .get_category_by_slug(&slug)
            .await?
            .ok_or_else(|| ViewError::NotFound(format!("category {slug:?}")))?;
        let products = self.gateway.list_products_by_category(category.id).await?;
        Ok(CategoryData {
            products: filter_by_category(&products, category.id),
            category,
        })
    }
}

// =============================================================================
// ADMIN CATALOG
// =============================================================================

pub struct CatalogScreen {
    gateway: Arc<dyn DataGateway>,
}

impl CatalogScreen {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl FetchPlan for CatalogScreen {
    type Key = ();
    type Data = Vec<Product>;
    const SCREEN: &'static str = "catalog";

    async fn fetch(&self, _key: ()) -> Result<Vec<Product>, ViewError> {
        Ok(self.gateway.list_products().await?)
    }
}

// =============================================================================
// ORDERS
// =============================================================================

/// Order list, optionally narrowed to one status.
pub struct OrdersScreen {
    orders: OrderClient,
}

impl OrdersScreen {
    pub fn new(orders: OrderClient) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl FetchPlan for OrdersScreen {
    type Key = Option<OrderStatus>;
    type Data = Vec<Order>;
    const SCREEN: &'static str = "orders";

    async fn fetch(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, ViewError> {
        Ok(self.orders.by_status(status).await?)
    }
}

pub struct OrderConfirmationScreen {
    orders: OrderClient,
}

impl OrderConfirmationScreen {
    pub fn new(orders: OrderClient) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl FetchPlan for OrderConfirmationScreen {
    type Key = OrderId;
    type Data = Order;
    const SCREEN: &'static str = "order_confirmation";

    async fn fetch(&self, id: OrderId) -> Result<Order, ViewError> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| ViewError::NotFound(id.to_string()))
    }
}
