//! HTTP surface: translates REST calls into store client calls.

pub mod api_types;
pub mod error;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
