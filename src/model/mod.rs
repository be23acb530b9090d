//! Plain domain types. The actor implementations live in the `*_actor` modules.

pub mod account;
pub mod candy;
pub mod order;
pub mod package;

pub use account::*;
pub use candy::*;
pub use order::*;
pub use package::*;
