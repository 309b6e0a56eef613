//! Error types for the Category store.

use thiserror::Error;

/// Errors that can occur during category operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(String),

    /// Slugs are lowercase letters, digits and inner hyphens.
    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("Category name must not be empty")]
    EmptyName,

    #[error("Slug already in use: {0}")]
    DuplicateSlug(String),

    #[error("Category rejected: {0}")]
    Rejected(String),

    #[error("Category store error: {0}")]
    Store(String),
}
