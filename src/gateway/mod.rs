//! # Remote Data Gateway
//!
//! The four reads every storefront screen is built from. Screens only see the
//! [`DataGateway`] trait; which backend answers is decided once, at startup.
//!
//! | Implementation | Backed by |
//! |---|---|
//! | [`StoreGateway`] | the in-process record stores |
//! | [`RestGateway`] | the hosted backend's REST API |
//! | [`ScriptedGateway`] | canned data, gates and call counters (tests, demos) |
//!
//! Categories come back ordered by name, products newest first.

pub mod rest;
pub mod scripted;
pub mod store;

pub use rest::RestGateway;
pub use scripted::{GatewayCall, ScriptedGateway};
pub use store::StoreGateway;

use crate::model::{Category, CategoryId, Product};
use async_trait::async_trait;
use thiserror::Error;

/// Why a gateway read failed. All of these are recoverable by retrying.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    /// The backend could not be reached or did not answer in time.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed backend response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait DataGateway: Send + Sync + 'static {
    async fn list_categories(&self) -> Result<Vec<Category>, GatewayError>;

    /// At most one category. `Ok(None)` when no category has `slug`.
    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>, GatewayError>;

    async fn list_products(&self) -> Result<Vec<Product>, GatewayError>;

    async fn list_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Product>, GatewayError>;
}
