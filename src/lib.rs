#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Candy Store
//!
//! A candy shop backend built on resource-oriented actors: a catalog with stock control, customer
//! accounts, carts, discounts and orders, persisted to CSV files.
//!
//! ## Architecture
//!
//! Three [`ResourceActor`](actor_framework::ResourceActor)s own all mutable state. Each runs in
//! its own Tokio task and handles one message at a time, so there are no locks around stock
//! levels or orders.
//!
//! ```text
//!                ┌────────────────┐
//!  Console ────▶ │ CheckoutService│ ──▶ OrderClient ──▶ Order actor ──┬──▶ Account actor
//!                └────────────────┘                                    └──▶ Inventory actor ──▶ InventorySubject
//!                                                                                                 (low-stock alerts)
//! ```
//!
//! ### Error handling
//! Each actor has its own error enum ([`InventoryError`](candy_actor::InventoryError),
//! [`AccountError`](account_actor::AccountError), [`OrderError`](order_actor::OrderError)).
//! Errors cross the actor boundary boxed in [`FrameworkError`](actor_framework::FrameworkError)
//! and the typed clients downcast them back, so callers match on concrete variants.
//! `OrderError` wraps the other two with `#[from]`.
//!
//! ### Context injection
//! Dependencies are injected via `run(context)`, not at construction. The order actor receives
//! the account and inventory clients this way. See [`lifecycle`].
//!
//! ## Module tour
//!
//! - [`model`]: plain data types ([`Candy`](model::Candy), [`Order`](model::Order),
//!   [`UserAccount`](model::UserAccount), packaging).
//! - [`candy_actor`], [`account_actor`], [`order_actor`]: the `ActorEntity` implementations.
//! - [`clients`]: typed wrappers over the generic `ResourceClient`.
//! - [`factory`], [`observer`], [`cart`], [`pricing`]: catalog factories, low-stock
//!   notifications, the shopping cart and price/discount commands.
//! - [`service`]: checkout and dashboard reports.
//! - [`repository`]: CSV persistence.
//! - [`lifecycle`], [`config`], [`console`]: startup, configuration and the text front-end.
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! CANDY_STORE_DATA_DIR=/tmp/candy RUST_LOG=debug cargo run
//! ```
//!
//! Tests that need actor dependencies use [`actor_framework::mock`].

pub mod account_actor;
pub mod candy_actor;
pub mod cart;
pub mod clients;
pub mod config;
pub mod console;
pub mod factory;
pub mod lifecycle;
pub mod model;
pub mod observer;
pub mod order_actor;
pub mod pricing;
pub mod repository;
pub mod service;
