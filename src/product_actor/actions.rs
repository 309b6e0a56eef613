//! Stock actions for the Product store.
//!
//! Every action answers with the quantity left on hand after it ran.

/// Stock operations beyond CRUD.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Takes units off the shelf for an order. Fails without changing anything if
    /// fewer units are available.
    Reserve(u32),
    /// Puts previously reserved units back (failed or cancelled order).
    Release(u32),
    /// Adds delivered units.
    Restock(u32),
}
