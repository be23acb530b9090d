//! Typed clients, one per actor.
//!
//! Each wraps the framework's generic [`ResourceClient`](actor_framework::ResourceClient) and
//! implements [`ActorClient`](actor_framework::ActorClient) to turn framework errors back into
//! the actor's own error enum.

pub mod account_client;
pub mod inventory_client;
pub mod order_client;

pub use account_client::AccountClient;
pub use inventory_client::InventoryClient;
pub use order_client::OrderClient;
