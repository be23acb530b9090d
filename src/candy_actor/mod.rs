//! # Inventory Actor
//!
//! Owns the candy catalog and its stock levels.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Candy`]
//! - [`error`] - [`InventoryError`]
//! - [`actions`] - [`InventoryAction`] and [`InventoryActionResult`] for stock movements
//! - [`new()`] - Factory function that creates the actor and its generic client
//!
//! ## Stock rules
//!
//! Stock is a `u32` and cannot go negative. `ReserveStock` is strict and fails with
//! [`InventoryError::InsufficientStock`], while `Decrement` saturates at zero. After a stock
//! decrease or an explicit set, a [`LowStockAlert`](crate::observer::LowStockAlert) goes out
//! to the context's [`InventorySubject`] when the level is at or below the threshold.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, generic_client) = candy_actor::new(32, 1);
//! let threshold = LowStockThreshold::new(10);
//! tokio::spawn(actor.run(InventoryContext {
//!     repo: InventoryRepository::new(&data_dir),
//!     alerts: subject.clone(),
//!     threshold: threshold.clone(),
//! }));
//! let inventory = InventoryClient::new(generic_client, threshold);
//! inventory.reserve_stock(CandyId(1), 3).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Candy;
use crate::observer::InventorySubject;
use crate::repository::InventoryRepository;
use actor_framework::{ResourceActor, ResourceClient};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Low-stock threshold shared by the actor and its clients. Changes apply immediately.
#[derive(Debug, Clone)]
pub struct LowStockThreshold(Arc<AtomicU32>);

impl LowStockThreshold {
    pub fn new(threshold: u32) -> Self {
        Self(Arc::new(AtomicU32::new(threshold)))
    }

    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, threshold: u32) {
        self.0.store(threshold, Ordering::Relaxed);
    }
}

impl Default for LowStockThreshold {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Dependencies of the inventory actor.
#[derive(Clone)]
pub struct InventoryContext {
    pub repo: InventoryRepository,
    pub alerts: InventorySubject,
    pub threshold: LowStockThreshold,
}

/// Creates a new Inventory actor and its client. Ids start at `first_id`.
pub fn new(buffer_size: usize, first_id: u32) -> (ResourceActor<Candy>, ResourceClient<Candy>) {
    ResourceActor::sequential(buffer_size, first_id)
}
