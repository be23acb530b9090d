//! Custom actions for the Order actor.

use crate::model::OrderStatus;
use crate::pricing::DiscountCommand;

#[derive(Debug)]
pub enum OrderAction {
    /// Applies each discount in order. Only allowed while the order is `Placed`.
    ApplyDiscounts(Vec<Box<dyn DiscountCommand>>),
    /// Moves the order one step forward, or to `Cancelled`, which releases its stock.
    AdvanceStatus(OrderStatus),
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// Grand total after the discounts.
    ApplyDiscounts(f64),
    /// The new status.
    AdvanceStatus(OrderStatus),
}
