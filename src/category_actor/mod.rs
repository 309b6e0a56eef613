//! # Category Store
//!
//! Categories have no context. The slug is the storefront's route key, so the store
//! refuses two categories with the same slug.
//!
//! - [`actions`]: [`CategoryAction`], retiring a category before it is deleted
//! - [`entity`]: [`Record`](grocer_store::Record) impl for [`Category`]
//! - [`error`]: [`CategoryError`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CategoryClient;
use crate::model::Category;
use grocer_store::RecordStore;

/// Creates the category store and its client.
pub fn new(buffer_size: usize) -> (RecordStore<Category>, CategoryClient) {
    let (store, client) = RecordStore::new(buffer_size);
    (store, CategoryClient::new(client))
}
