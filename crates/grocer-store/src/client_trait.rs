//! # RecordClient Trait
//!
//! Domain clients (`CategoryClient`, `ProductClient`, ...) wrap a [`StoreClient`] and map
//! [`StoreError`] into their own error enum. Implementing this trait gives them `get`,
//! `list` and `delete` for free.

use crate::{Record, StoreClient, StoreError};
use async_trait::async_trait;

/// Shared read/delete surface for domain-specific store clients.
#[async_trait]
pub trait RecordClient<T: Record>: Send + Sync {
    /// The domain error type.
    type Error: Send + Sync;

    /// The wrapped generic client.
    fn inner(&self) -> &StoreClient<T>;

    /// Converts store errors into the domain error.
    fn map_error(e: StoreError) -> Self::Error;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: Option<T::Filter>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
