//! Shipment optimizer.
//!
//! This module implements the core planning pipeline that answers:
//! "Given where I am and what my vehicle carries, what should I ship where?"
//!
//! Demand is turned into one candidate shipment per (good, destination),
//! each scored by a time-decayed profit model, and an exact 0/1 knapsack
//! picks the most profitable set that fits the vehicle. Selected shipments
//! are grouped into one transport plan per destination.

mod candidate;
mod config;
mod engine;
pub mod knapsack;
mod plan;

pub use candidate::{
    Candidate, CandidateStats, base_profit, max_quantity, retention, scored_profit,
};
pub use config::{CELL_EPSILON, OptimizerConfig};
pub use engine::{DistanceOracle, OptimizeError, ShipmentOptimizer};
pub use plan::{OptimizationResult, TransportPlan, assemble};
