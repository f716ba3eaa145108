//! Client handles for talking to actors.

#[macro_use]
mod macros;
mod store_client;

pub use store_client::*;
