use crate::model::OrderStatus;

/// Status changes. Both answer with the order's new status.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Moves the order one step forward. Advancing to `Cancelled` behaves like `Cancel`.
    Advance(OrderStatus),
    /// Cancels the order and puts its stock back on the shelf.
    Cancel,
}
