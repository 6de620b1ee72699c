//! Web layer for the produce planner.
//!
//! Provides HTTP endpoints for inspecting the route graph, adding routes and
//! computing transport plans.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Snapshot};
