//! # Offer Client

use super::unbox;
use crate::model::{Offer, OfferDraft, OfferFilter, OfferId, OfferPatch};
use crate::offer_actor::OfferError;
use async_trait::async_trait;
use grocer_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct OfferClient {
    inner: StoreClient<Offer>,
}

impl OfferClient {
    pub fn new(inner: StoreClient<Offer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_offer(&self, draft: OfferDraft) -> Result<OfferId, OfferError> {
        debug!("Sending request");
        self.inner.create(draft).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_offer(&self, id: OfferId, patch: OfferPatch) -> Result<Offer, OfferError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    /// Looks a code up case-insensitively, active or not.
    #[instrument(skip(self))]
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Offer>, OfferError> {
        let matches = self.list(Some(OfferFilter::Code(code.to_string()))).await?;
        Ok(matches.into_iter().next())
    }

    /// Offers customers can currently redeem, newest first.
    #[instrument(skip(self))]
    pub async fn active(&self) -> Result<Vec<Offer>, OfferError> {
        let mut offers = self.list(Some(OfferFilter::Active)).await?;
        offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(offers)
    }
}

#[async_trait]
impl RecordClient<Offer> for OfferClient {
    type Error = OfferError;

    fn inner(&self) -> &StoreClient<Offer> {
        &self.inner
    }

    fn map_error(e: StoreError) -> OfferError {
        match e {
            StoreError::NotFound(id) => OfferError::NotFound(id),
            StoreError::Conflict(code) => OfferError::DuplicateCode(code),
            StoreError::Record(e) => unbox(e).unwrap_or_else(OfferError::Rejected),
            other => OfferError::Store(other.to_string()),
        }
    }
}
