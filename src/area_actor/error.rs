use thiserror::Error;

/// Errors that can occur during service-area operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AreaError {
    #[error("Service area not found: {0}")]
    NotFound(String),

    #[error("Area name must not be empty")]
    EmptyName,

    /// Postal codes are 3 to 10 ASCII letters, digits or spaces.
    #[error("Invalid postal code: {0:?}")]
    InvalidPostalCode(String),

    #[error("Invalid delivery fee: {0}")]
    InvalidFee(f64),

    #[error("Postal code already served: {0}")]
    DuplicatePostalCode(String),

    #[error("Area rejected: {0}")]
    Rejected(String),

    #[error("Area store error: {0}")]
    Store(String),
}
