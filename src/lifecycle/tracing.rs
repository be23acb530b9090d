//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run                       # actor lifecycle, creates, low-stock warnings
//! RUST_LOG=debug cargo run                      # full payloads of every request
//! RUST_LOG=actor_framework=warn,candy_store=debug cargo run
//! ```
//!
//! Actor loops log an `entity_type` field instead of a module path, so targets are hidden.
//! A checkout at `info` looks like:
//!
//! ```text
//! INFO checkout: Created entity_type="Order" id=order_1 size=1
//! INFO checkout: Action ok entity_type="Order" id=order_1
//! INFO checkout: Checkout complete order_id=order_1 total=6.75
//! ```
//!
//! Passwords, recovery answers and their hashes have redacted `Debug` impls, so they stay out of
//! `debug` logs too.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
