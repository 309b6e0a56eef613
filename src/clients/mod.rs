//! # Domain Clients
//!
//! One typed client per store. Each wraps a [`StoreClient`](grocer_store::StoreClient),
//! exposes domain methods, and gets `get`/`list`/`delete` from
//! [`RecordClient`](grocer_store::RecordClient).
//!
//! Record failures travel through the store boxed; [`unbox`] recovers the record's own
//! error type so callers can match on it.

pub mod area_client;
pub mod category_client;
pub mod offer_client;
pub mod order_client;
pub mod product_client;

pub use area_client::AreaClient;
pub use category_client::CategoryClient;
pub use offer_client::OfferClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;

/// Recovers a record error of type `E` from a boxed store error, or the message of
/// whatever else was in the box.
pub(crate) fn unbox<E>(e: Box<dyn std::error::Error + Send + Sync>) -> Result<E, String>
where
    E: std::error::Error + Send + Sync + 'static,
{
    e.downcast::<E>().map(|e| *e).map_err(|other| other.to_string())
}
