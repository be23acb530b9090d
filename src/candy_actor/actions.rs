//! Custom actions for the Inventory actor.
//!
//! Stock movements on a single [`Candy`](crate::model::Candy). They are handled by
//! [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action).

/// Stock operations on one candy.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Replaces the stock level.
    SetStock(u32),
    /// Removes units, stopping at zero. Used for shrinkage and manual corrections.
    Decrement(u32),
    /// Removes units for an order.
    ///
    /// # Errors
    /// Fails if the amount is zero or exceeds available stock.
    ReserveStock(u32),
    /// Puts previously reserved units back.
    ReleaseStock(u32),
}

/// Results from InventoryActions - variants match 1:1 with InventoryAction.
/// Each carries the stock level after the action.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryActionResult {
    CheckStock(u32),
    SetStock(u32),
    Decrement(u32),
    ReserveStock(u32),
    ReleaseStock(u32),
}
