//! Error types for the Product store.

use crate::model::CategoryId;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product name must not be empty")]
    EmptyName,

    #[error("Product unit must not be empty")]
    EmptyUnit,

    /// Prices must be finite and not negative.
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Unknown category: {0}")]
    UnknownCategory(CategoryId),

    #[error("Category {0} is being removed")]
    RetiredCategory(CategoryId),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Product rejected: {0}")]
    Rejected(String),

    #[error("Product store error: {0}")]
    Store(String),
}
