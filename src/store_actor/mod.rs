//! The actor that owns the order store and serializes access to it.

mod service;

pub use service::*;
