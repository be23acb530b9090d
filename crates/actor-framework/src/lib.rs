//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent actor systems. Each resource type (a candy, an
//! account, an order) is owned by one actor that processes requests one at a time, and
//! everything else talks to it through a cloneable client.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]): the domain model and its hooks.
//! 2. **Runtime Layer** ([`ResourceActor`]): the message loop that owns the store.
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]): typed request/response calls.
//!
//! Business rules live in the entity. The actor supplies id assignment, storage, sequencing and
//! error wrapping.
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected when the actor is started, not when it is constructed. All actors
//! and clients are created first, then each actor is spawned with the clients it needs:
//!
//! ```rust,ignore
//! let (inventory_actor, inventory) = ResourceActor::<Candy>::sequential(32, 1);
//! let (order_actor, orders) = ResourceActor::<Order>::sequential(32, 1);
//!
//! tokio::spawn(inventory_actor.run(inventory_context));
//! tokio::spawn(order_actor.run(OrderContext { inventory: inventory.clone(), .. }));
//! ```
//!
//! So an order can reserve stock from inside its `on_create` hook without the two actors
//! knowing about each other at construction time.
//!
//! ## Errors
//!
//! Plumbing failures are [`FrameworkError`] variants. Errors raised by entity hooks are boxed
//! into [`FrameworkError::EntityError`]; resource clients recover the typed error with
//! [`FrameworkError::downcast_entity`].
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor
//! - Actors run in parallel with each other
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a client's requests from scripted expectations. See the
//! [`mock`] module for the testing patterns.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
