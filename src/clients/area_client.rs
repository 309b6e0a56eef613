//! # Service Area Client

use super::unbox;
use crate::area_actor::AreaError;
use crate::model::{AreaDraft, AreaFilter, AreaId, AreaPatch, ServiceArea};
use async_trait::async_trait;
use grocer_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct AreaClient {
    inner: StoreClient<ServiceArea>,
}

impl AreaClient {
    pub fn new(inner: StoreClient<ServiceArea>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_area(&self, draft: AreaDraft) -> Result<AreaId, AreaError> {
        debug!("Sending request");
        self.inner.create(draft).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_area(
        &self,
        id: AreaId,
        patch: AreaPatch,
    ) -> Result<ServiceArea, AreaError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// The area serving `postal_code`, whether active or not.
    #[instrument(skip(self))]
    pub async fn find_by_postal_code(
        &self,
        postal_code: &str,
    ) -> Result<Option<ServiceArea>, AreaError> {
        let matches = self
            .list(Some(AreaFilter::PostalCode(postal_code.to_string())))
            .await?;
        Ok(matches.into_iter().next())
    }
}

#[async_trait]
impl RecordClient<ServiceArea> for AreaClient {
    type Error = AreaError;

    fn inner(&self) -> &StoreClient<ServiceArea> {
        &self.inner
    }

    fn map_error(e: StoreError) -> AreaError {
        match e {
            StoreError::NotFound(id) => AreaError::NotFound(id),
            StoreError::Conflict(code) => AreaError::DuplicatePostalCode(code),
            StoreError::Record(e) => unbox(e).unwrap_or_else(AreaError::Rejected),
            other => AreaError::Store(other.to_string()),
        }
    }
}
