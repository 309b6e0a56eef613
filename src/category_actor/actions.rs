//! Deletion guard for the Category store.

/// Marks a category as closed to new products, or opens it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryAction {
    Retire,
    Reinstate,
}
