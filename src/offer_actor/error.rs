//! Error types for the Offer store.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OfferError {
    #[error("Offer not found: {0}")]
    NotFound(String),

    #[error("Offer title must not be empty")]
    EmptyTitle,

    /// Codes are 3 to 20 ASCII letters or digits.
    #[error("Invalid offer code: {0:?}")]
    InvalidCode(String),

    #[error("Discount must be between 1 and 90 percent, got {0}")]
    InvalidDiscount(u8),

    #[error("Invalid minimum order: {0}")]
    InvalidMinimum(f64),

    #[error("Offer code already in use: {0}")]
    DuplicateCode(String),

    #[error("Offer rejected: {0}")]
    Rejected(String),

    #[error("Offer store error: {0}")]
    Store(String),
}
