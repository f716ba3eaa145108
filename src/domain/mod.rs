//! Business entities. Plain data, no actor or HTTP concerns.

pub mod product;
pub mod order;

pub use product::*;
pub use order::*;
