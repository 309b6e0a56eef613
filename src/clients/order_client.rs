//! # Order Client
//!
//! Placing an order is a single `create`: stock reservation happens inside the order
//! store's `on_create` hook.

use super::unbox;
use crate::model::{Order, OrderDraft, OrderFilter, OrderId, OrderPatch, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use grocer_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: StoreClient<Order>,
}

impl OrderClient {
    pub fn new(inner: StoreClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(
        skip(self, draft),
        fields(customer = %draft.customer_id, lines = draft.lines.len())
    )]
    pub async fn place_order(&self, draft: OrderDraft) -> Result<OrderId, OrderError> {
        info!("Placing order");
        self.inner.create(draft).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn change_address(&self, id: OrderId, address: String) -> Result<Order, OrderError> {
        debug!("Sending request");
        let patch = OrderPatch {
            address: Some(address),
        };
        self.inner.update(id, patch).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId, next: OrderStatus) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Advance(next))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Cancel)
            .await
            .map_err(Self::map_error)
    }

    /// Orders in `status`, or every order, newest first.
    #[instrument(skip(self))]
    pub async fn by_status(&self, status: Option<OrderStatus>) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list(status.map(OrderFilter::Status)).await?;
        orders.reverse();
        Ok(orders)
    }

    /// A customer's orders, newest first.
    #[instrument(skip(self))]
    pub async fn for_customer(&self, customer_id: &str) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .list(Some(OrderFilter::Customer(customer_id.to_string())))
            .await?;
        orders.reverse();
        Ok(orders)
    }
}

#[async_trait]
impl RecordClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &StoreClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> OrderError {
        match e {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            StoreError::Record(e) => unbox(e).unwrap_or_else(OrderError::Rejected),
            other => OrderError::Store(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grocer_store::mock::MockStore;

    #[tokio::test]
    async fn test_advance_returns_new_status() {
        let mut mock = MockStore::<Order>::new();
        mock.expect_action(OrderId(4)).return_ok(OrderStatus::Packed);

        let orders = OrderClient::new(mock.client());
        assert_eq!(
            orders.advance(OrderId(4), OrderStatus::Packed).await,
            Ok(OrderStatus::Packed)
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_cancel_unknown_order() {
        let mut mock = MockStore::<Order>::new();
        mock.expect_action(OrderId(99))
            .return_err(StoreError::NotFound("order_99".into()));

        let orders = OrderClient::new(mock.client());
        assert_eq!(
            orders.cancel(OrderId(99)).await,
            Err(OrderError::NotFound("order_99".into()))
        );
    }

    #[tokio::test]
    async fn test_by_status_lists_newest_first() {
        let mut mock = MockStore::<Order>::new();
        mock.expect_list().return_ok(vec![]);

        let orders = OrderClient::new(mock.client());
        assert!(orders.by_status(Some(OrderStatus::Placed)).await.unwrap().is_empty());
        mock.verify();
    }
}
