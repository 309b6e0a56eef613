//! [`Record`] implementation for [`Order`].
//!
//! Placing an order reserves stock line by line through the product store. If any line
//! cannot be reserved, the lines already reserved are released and the order is never
//! stored.

use super::{OrderAction, OrderError};
use crate::clients::ProductClient;
use crate::model::{Order, OrderDraft, OrderFilter, OrderId, OrderLine, OrderPatch, OrderStatus};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use chrono::Utc;
use grocer_store::Record;
use tracing::warn;

fn reservation_error(line: &OrderLine, e: ProductError) -> OrderError {
    match e {
        ProductError::NotFound(_) => OrderError::UnknownProduct(line.product_id),
        ProductError::InsufficientStock {
            requested,
            available,
        } => OrderError::OutOfStock {
            product_id: line.product_id,
            requested,
            available,
        },
        other => OrderError::Product(other),
    }
}

async fn release_lines(products: &ProductClient, lines: &[OrderLine]) {
    for line in lines {
        if let Err(e) = products.release_stock(line.product_id, line.quantity).await {
            warn!(product_id = %line.product_id, error = %e, "Failed to release stock");
        }
    }
}

impl Order {
    fn cancel(&mut self) -> Result<(), OrderError> {
        if !self.status.can_transition_to(OrderStatus::Cancelled) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: OrderStatus::Cancelled,
            });
        }
        self.status = OrderStatus::Cancelled;
        Ok(())
    }
}

#[async_trait]
impl Record for Order {
    type Id = OrderId;
    type Draft = OrderDraft;
    type Patch = OrderPatch;
    type Filter = OrderFilter;
    type Action = OrderAction;
    type Outcome = OrderStatus;
    type Context = ProductClient;
    type Error = OrderError;

    fn from_draft(id: OrderId, draft: OrderDraft) -> Result<Self, OrderError> {
        if draft.customer_id.trim().is_empty() {
            return Err(OrderError::MissingCustomer);
        }
        if draft.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(line) = draft.lines.iter().find(|l| l.quantity == 0) {
            return Err(OrderError::ZeroQuantity(line.product_id));
        }
        if draft.delivery.address.trim().is_empty() {
            return Err(OrderError::EmptyAddress);
        }
        Ok(Self {
            id,
            customer_id: draft.customer_id,
            lines: draft.lines,
            delivery: draft.delivery,
            offer_code: draft.offer_code,
            subtotal: draft.subtotal,
            discount: draft.discount,
            delivery_fee: draft.delivery_fee,
            total: draft.total,
            status: OrderStatus::Placed,
            placed_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::Status(status) => self.status == *status,
            OrderFilter::Customer(customer_id) => &self.customer_id == customer_id,
        }
    }

    async fn on_create(&mut self, products: &ProductClient) -> Result<(), OrderError> {
        for (reserved, line) in self.lines.iter().enumerate() {
            if let Err(e) = products.reserve_stock(line.product_id, line.quantity).await {
                release_lines(products, &self.lines[..reserved]).await;
                return Err(reservation_error(line, e));
            }
        }
        Ok(())
    }

    async fn on_update(
        &mut self,
        patch: OrderPatch,
        _products: &ProductClient,
    ) -> Result<(), OrderError> {
        if self.status != OrderStatus::Placed {
            return Err(OrderError::Locked(self.status));
        }
        if let Some(address) = patch.address {
            if address.trim().is_empty() {
                return Err(OrderError::EmptyAddress);
            }
            self.delivery.address = address;
        }
        Ok(())
    }

    async fn on_delete(&self, _products: &ProductClient) -> Result<(), OrderError> {
        if self.status.is_final() {
            Ok(())
        } else {
            Err(OrderError::Locked(self.status))
        }
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        products: &ProductClient,
    ) -> Result<OrderStatus, OrderError> {
        match action {
            OrderAction::Cancel | OrderAction::Advance(OrderStatus::Cancelled) => {
                self.cancel()?;
                release_lines(products, &self.lines).await;
            }
            OrderAction::Advance(next) => {
                if !self.status.can_transition_to(next) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: next,
                    });
                }
                self.status = next;
            }
        }
        Ok(self.status)
    }
}
