//! # Offer Store
//!
//! Promotional codes redeemed at checkout. Codes are unique regardless of case.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OfferClient;
use crate::model::Offer;
use grocer_store::RecordStore;

pub fn new(buffer_size: usize) -> (RecordStore<Offer>, OfferClient) {
    let (store, client) = RecordStore::new(buffer_size);
    (store, OfferClient::new(client))
}
