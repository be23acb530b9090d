//! Error types for the Account actor.

use crate::repository::RepositoryError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AccountError {
    /// No account with this username.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// The username is taken.
    #[error("Account already exists: {0}")]
    AlreadyExists(String),

    #[error("Account validation error: {0}")]
    Validation(String),

    /// Password hashing failed or the hasher was misconfigured.
    #[error("Credential hashing error: {0}")]
    Hashing(String),

    #[error("Account storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<RepositoryError> for AccountError {
    fn from(e: RepositoryError) -> Self {
        AccountError::Storage(e.to_string())
    }
}
