//! # Account Actor
//!
//! Owns user accounts, keyed by username.
//!
//! Plaintext secrets never reach the actor. [`AccountClient`](crate::clients::AccountClient)
//! hashes passwords and recovery answers with its [`CredentialHasher`] before sending them,
//! and the actor only stores and verifies PHC strings.

pub mod actions;
pub mod credentials;
pub mod entity;
pub mod error;

pub use actions::*;
pub use credentials::CredentialHasher;
pub use error::*;

use crate::model::{AccountCreate, UserAccount};
use crate::repository::AccountRepository;
use actor_framework::{ResourceActor, ResourceClient};

#[derive(Clone)]
pub struct AccountContext {
    pub repo: AccountRepository,
}

/// Creates a new Account actor and its client. The id of a new account is its trimmed username.
pub fn new(buffer_size: usize) -> (ResourceActor<UserAccount>, ResourceClient<UserAccount>) {
    ResourceActor::new(buffer_size, |params: &AccountCreate| {
        params.username.trim().to_string()
    })
}
