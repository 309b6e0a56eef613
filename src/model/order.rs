//! A placed customer order.
//!
//! Creating an order reserves stock for every line (see
//! [`impl Record for Order`](crate::order_actor)); status then only moves forward.

use super::{AreaId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

super::record_id!(
    /// Type-safe identifier for Orders.
    OrderId,
    "order"
);

/// Fulfilment stage of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Placed,
    Packed,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Forward-only: Placed → Packed → OutForDelivery → Delivered, and cancellation
    /// while the order has not left the store.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Placed, Packed)
                | (Packed, OutForDelivery)
                | (OutForDelivery, Delivered)
                | (Placed, Cancelled)
                | (Packed, Cancelled)
        )
    }

    pub fn is_final(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Packed => "packed",
            OrderStatus::OutForDelivery => "out for delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// One product line, priced at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit: String,
    pub unit_price: f64,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub address: String,
    pub postal_code: String,
    pub area_id: AreaId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: String,
    pub lines: Vec<OrderLine>,
    pub delivery: DeliveryDetails,
    pub offer_code: Option<String>,
    pub subtotal: f64,
    pub discount: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Payload for placing an order. Amounts are computed by checkout.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_id: String,
    pub lines: Vec<OrderLine>,
    pub delivery: DeliveryDetails,
    pub offer_code: Option<String>,
    pub subtotal: f64,
    pub discount: f64,
    pub delivery_fee: f64,
    pub total: f64,
}

/// Corrections allowed while an order is still `Placed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    pub address: Option<String>,
}

/// Selects orders in a `List` request.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderFilter {
    Status(OrderStatus),
    Customer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_moves_forward_only() {
        use OrderStatus::*;
        assert!(Placed.can_transition_to(Packed));
        assert!(Packed.can_transition_to(OutForDelivery));
        assert!(OutForDelivery.can_transition_to(Delivered));
        assert!(Placed.can_transition_to(Cancelled));

        assert!(!Packed.can_transition_to(Placed));
        assert!(!OutForDelivery.can_transition_to(Cancelled));
        assert!(!Delivered.can_transition_to(Cancelled));
        assert!(!Placed.can_transition_to(Delivered));
        assert!(Delivered.is_final() && Cancelled.is_final());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"out_for_delivery\""
        );
    }

    #[test]
    fn test_line_total() {
        let line = OrderLine {
            product_id: ProductId(1),
            name: "Eggs".into(),
            unit: "dozen".into(),
            unit_price: 72.5,
            quantity: 2,
        };
        assert_eq!(line.line_total(), 145.0);
    }
}
