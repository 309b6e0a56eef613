//! # Order Store
//!
//! Orders depend on products: the store runs with a
//! [`ProductClient`](crate::clients::ProductClient) as context, reserves stock when an
//! order is placed, and releases it when an order is cancelled.
//!
//! ```text
//! Checkout ──create──▶ Order store ──Reserve(q)──▶ Product store
//!                            │ on failure
//!                            └──────Release(q)───▶ (lines already reserved)
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use grocer_store::RecordStore;

/// Creates the order store and its client.
pub fn new(buffer_size: usize) -> (RecordStore<Order>, OrderClient) {
    let (store, client) = RecordStore::new(buffer_size);
    (store, OrderClient::new(client))
}
