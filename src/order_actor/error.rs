//! Error types for the Order store.

use crate::model::{OrderStatus, ProductId};
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Order has no lines")]
    EmptyOrder,

    #[error("Customer id must not be empty")]
    MissingCustomer,

    #[error("Delivery address must not be empty")]
    EmptyAddress,

    #[error("Line for {0} has zero quantity")]
    ZeroQuantity(ProductId),

    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error("Out of stock: {product_id} (requested {requested}, available {available})")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Only `Placed` orders can be edited, and only final orders deleted.
    #[error("Order is {0}")]
    Locked(OrderStatus),

    #[error("Product error: {0}")]
    Product(#[from] ProductError),

    #[error("Order rejected: {0}")]
    Rejected(String),

    #[error("Order store error: {0}")]
    Store(String),
}
