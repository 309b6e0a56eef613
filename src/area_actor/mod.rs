//! # Service Area Store
//!
//! Postal codes the shop delivers to. Checkout looks the customer's postal code up here
//! to validate the address and price delivery.

pub mod entity;
pub mod error;

pub use entity::normalize_postal_code;
pub use error::*;

use crate::clients::AreaClient;
use crate::model::ServiceArea;
use grocer_store::RecordStore;

pub fn new(buffer_size: usize) -> (RecordStore<ServiceArea>, AreaClient) {
    let (store, client) = RecordStore::new(buffer_size);
    (store, AreaClient::new(client))
}
