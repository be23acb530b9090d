//! # Order Actor
//!
//! Owns customer orders and coordinates with the account and inventory actors.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`], which wraps [`InventoryError`](crate::candy_actor::InventoryError)
//!   and [`AccountError`](crate::account_actor::AccountError) from the actors it calls
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`]
//! - [`new()`] - Factory function that creates the actor and its generic client
//!
//! ## Coordination
//!
//! The order actor holds typed clients to the other two actors in its [`OrderContext`]. Its
//! `on_create` hook awaits them while the order is being placed. Those actors run their own
//! loops, so the calls never wait on the order actor itself.
//!
//! ```text
//! OrderClient ──create──▶ Order actor ──get──────▶ Account actor
//!                                     ──reserve──▶ Inventory actor
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{AccountClient, InventoryClient};
use crate::model::Order;
use crate::repository::OrderRepository;
use actor_framework::{ResourceActor, ResourceClient};

/// Dependencies of the order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub accounts: AccountClient,
    pub inventory: InventoryClient,
    pub repo: OrderRepository,
}

/// Creates a new Order actor and its client. Ids start at `first_id`.
pub fn new(buffer_size: usize, first_id: u32) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::sequential(buffer_size, first_id)
}
