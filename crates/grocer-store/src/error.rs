//! # Store Errors
//!
//! Errors raised by the store plumbing itself. Record-level failures are carried inside
//! [`StoreError::Record`] so callers can still surface the record's own message.

/// Errors that can occur while talking to a record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    Closed,
    #[error("Store dropped response channel")]
    Dropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Duplicate key: {0}")]
    Conflict(String),
    #[error("Record error: {0}")]
    Record(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub(crate) fn record<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        StoreError::Record(Box::new(e))
    }
}
