//! # Product Store
//!
//! Products carry the shop's inventory. Beyond CRUD the store answers stock actions
//! ([`ProductAction`]) used by checkout and by the order store:
//!
//! ```rust,ignore
//! let left = products.reserve_stock(id, 3).await?;   // fails if fewer than 3 on hand
//! products.release_stock(id, 3).await?;              // order failed or was cancelled
//! ```
//!
//! The store's context is the [`CategoryClient`](crate::clients::CategoryClient), so a
//! product can only point at an existing category.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use grocer_store::RecordStore;

/// Creates the product store and its client.
pub fn new(buffer_size: usize) -> (RecordStore<Product>, ProductClient) {
    let (store, client) = RecordStore::new(buffer_size);
    (store, ProductClient::new(client))
}
