//! Domain types for the produce planner.
//!
//! This module contains the validated records the planner works with:
//! locations, goods and demand. All types enforce their invariants at
//! construction time, so the graph and optimizer can trust them.

mod demand;
mod error;
mod good;
mod location;

pub use demand::DemandRecord;
pub use error::RecordError;
pub use good::Good;
pub use location::{Coordinates, Location, LocationId};
