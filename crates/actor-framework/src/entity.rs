//! # ActorEntity Trait
//!
//! The contract a resource type implements to be owned by a [`ResourceActor`](crate::ResourceActor).
//! The associated types pin down the id, the create/update payloads, the custom actions and the
//! error type, so a `Candy` actor can never be handed an `Order` payload.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] runs after construction and before the entity is stored.
//! - [`ActorEntity::on_delete`] runs before the entity is removed.
//!
//! Both default to `Ok(())`. A hook that returns an error aborts the operation and leaves the
//! store untouched.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` value is handed to
/// `ResourceActor::run` and passed by reference into every hook, which lets an order
/// reach the account and inventory clients that were created alongside it.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Unique key of the entity. Ordered so listings come back in key order.
    type Id: Ord + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()`. Use `()` if none are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per action. Clients get a single type to match on,
    /// at the cost of some variants being impossible for some actions.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The key this entity is stored under.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from the assigned id and the payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
