//! Error types for the Inventory actor.

use crate::repository::RepositoryError;
use thiserror::Error;

/// Errors that can occur during catalog and stock operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// The requested candy was not found.
    #[error("Candy not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The provided quantity is invalid (zero where a positive amount is required).
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The candy data provided is invalid.
    #[error("Candy validation error: {0}")]
    Validation(String),

    /// Reading or writing inventory.csv failed.
    #[error("Inventory storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<RepositoryError> for InventoryError {
    fn from(e: RepositoryError) -> Self {
        InventoryError::Storage(e.to_string())
    }
}
