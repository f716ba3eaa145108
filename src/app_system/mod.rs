//! System orchestration, configuration, startup, and shutdown logic.

pub mod order_system;
pub mod telemetry;
pub mod config;

pub use order_system::*;
pub use telemetry::*;
pub use config::*;
