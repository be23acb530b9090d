//! # Store Lifecycle
//!
//! Starting, wiring and stopping the actors.
//!
//! ## Dependency injection via context
//!
//! Actors are created without their dependencies, then each gets its context in `run()`. The
//! order actor's context holds clients to the inventory and account actors:
//!
//! ```rust,ignore
//! impl ActorEntity for Candy { type Context = InventoryContext; }   // repo, alerts, threshold
//! impl ActorEntity for UserAccount { type Context = AccountContext; } // repo
//! impl ActorEntity for Order { type Context = OrderContext; }       // accounts, inventory, repo
//! ```
//!
//! ## Shutdown
//!
//! 1. Drop every client, which closes the senders.
//! 2. Each actor's `recv()` returns `None` once its mailbox is drained, and its task ends.
//! 3. The order actor's exit drops its clones of the other clients, which lets those actors
//!    finish in turn.
//!
//! The dependency graph is acyclic, so channel closure is enough and no explicit shutdown
//! message is needed.

pub mod store_system;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use store_system::*;
