//! Error types for the Order actor.

use crate::account_actor::AccountError;
use crate::candy_actor::InventoryError;
use crate::model::OrderStatus;
use crate::repository::RepositoryError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// No account exists for the customer placing the order.
    #[error("Unknown customer: {0}")]
    UnknownCustomer(String),

    #[error("Order has no items")]
    EmptyOrder,

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    Validation(String),

    #[error("Cannot move order from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The operation is not allowed in the order's current status.
    #[error("Invalid order state: {0}")]
    InvalidState(String),

    /// Stock reservation or release failed.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// The account lookup failed.
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("Order storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<RepositoryError> for OrderError {
    fn from(e: RepositoryError) -> Self {
        OrderError::Storage(e.to_string())
    }
}
