//! The shipment optimizer: catalog, demand and the `optimize` pipeline.

use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;

use tracing::{debug, info};

use super::candidate::Generation;
use super::config::OptimizerConfig;
use super::knapsack::{self, Item};
use super::plan::{OptimizationResult, assemble};
use crate::domain::{DemandRecord, Good};
use crate::graph::LocationGraph;

/// Error from an optimization request.
///
/// These are parameter errors, raised before any work starts. "Nothing
/// feasible" is not an error; it is an empty [`OptimizationResult`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptimizeError {
    /// Capacity must be at least one unit
    #[error("vehicle capacity must be positive, got {0}")]
    NonPositiveCapacity(i64),

    /// Capacity exceeds the largest supported vehicle
    #[error("vehicle capacity {0} is too large")]
    CapacityTooLarge(i64),

    /// The caller stopped the run before selection finished
    #[error("optimization cancelled")]
    Cancelled,

    /// The origin is not a registered location
    #[error("unknown origin: {0}")]
    UnknownOrigin(String),
}

/// Source of shortest distances between named locations.
///
/// This abstraction allows the optimizer to be tested with fixed distances.
pub trait DistanceOracle {
    /// Returns true if the location is known.
    fn contains(&self, location: &str) -> bool;

    /// Shortest distance, or `None` if unreachable.
    fn distance(&self, from: &str, to: &str) -> Option<u64>;
}

impl DistanceOracle for LocationGraph {
    fn contains(&self, location: &str) -> bool {
        LocationGraph::contains(self, location)
    }

    fn distance(&self, from: &str, to: &str) -> Option<u64> {
        self.shortest_distance(from, to)
    }
}

/// Owns the goods catalog and per-destination demand, and turns them into
/// transport plans for a given origin and capacity.
///
/// `optimize` takes `&self` and builds all working state locally, so
/// repeated calls on unchanged state return identical results.
#[derive(Debug, Clone, Default)]
pub struct ShipmentOptimizer {
    config: OptimizerConfig,
    goods: BTreeMap<String, Good>,
    /// destination → good → requested units
    demand: BTreeMap<String, BTreeMap<String, u32>>,
}

impl ShipmentOptimizer {
    /// Create an optimizer with an empty catalog.
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            goods: BTreeMap::new(),
            demand: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Add a good to the catalog, returning any good it replaced.
    pub fn add_good(&mut self, good: Good) -> Option<Good> {
        self.goods.insert(good.name().to_string(), good)
    }

    /// Record demand, returning the quantity it replaced for that
    /// (destination, good) pair.
    pub fn set_demand(&mut self, record: DemandRecord) -> Option<u32> {
        self.demand
            .entry(record.destination().to_string())
            .or_default()
            .insert(record.good().to_string(), record.quantity())
    }

    /// Look up a good by name.
    pub fn good(&self, name: &str) -> Option<&Good> {
        self.goods.get(name)
    }

    /// All goods, ordered by name.
    pub fn goods(&self) -> impl Iterator<Item = &Good> {
        self.goods.values()
    }

    /// Demand at a destination, good name → units, ordered by good name.
    pub fn demand_at(&self, destination: &str) -> Option<&BTreeMap<String, u32>> {
        self.demand.get(destination)
    }

    /// Destinations with demand, ordered by name.
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.demand.keys().map(String::as_str)
    }

    /// Number of (destination, good) demand records.
    pub fn demand_count(&self) -> usize {
        self.demand.values().map(BTreeMap::len).sum()
    }

    /// Choose which demand to serve from `origin` with a vehicle of
    /// `capacity` units to maximize time-adjusted profit.
    ///
    /// Every shipment is one whole candidate; the combined weight of all
    /// plans never exceeds `capacity`.
    pub fn optimize<G: DistanceOracle>(
        &self,
        graph: &G,
        origin: &str,
        capacity: i64,
    ) -> Result<OptimizationResult, OptimizeError> {
        self.optimize_until(graph, origin, capacity, &AtomicBool::new(false))
    }

    /// [`optimize`](Self::optimize), stopping with
    /// [`OptimizeError::Cancelled`] once `cancel` is set.
    pub fn optimize_until<G: DistanceOracle>(
        &self,
        graph: &G,
        origin: &str,
        capacity: i64,
        cancel: &AtomicBool,
    ) -> Result<OptimizationResult, OptimizeError> {
        if capacity <= 0 {
            return Err(OptimizeError::NonPositiveCapacity(capacity));
        }
        let capacity_units =
            u32::try_from(capacity).map_err(|_| OptimizeError::CapacityTooLarge(capacity))?;
        if !graph.contains(origin) {
            return Err(OptimizeError::UnknownOrigin(origin.to_string()));
        }

        let generation = Generation {
            oracle: graph,
            goods: &self.goods,
            demand: &self.demand,
            config: &self.config,
        };
        let (candidates, stats) = generation.run(origin, capacity_units);

        if candidates.is_empty() {
            info!(
                origin,
                capacity,
                considered = stats.considered,
                unreachable = stats.unreachable,
                too_slow = stats.too_slow,
                zero_distance = stats.zero_distance,
                over_capacity = stats.over_capacity,
                unprofitable = stats.unprofitable,
                "no feasible shipments"
            );
            return Ok(OptimizationResult {
                origin: origin.to_string(),
                capacity: capacity_units,
                plans: Vec::new(),
                stats,
            });
        }

        let items: Vec<Item> = candidates
            .iter()
            .map(|c| Item {
                cells: c.cells,
                value: c.profit,
            })
            .collect();
        // Cells beyond what every candidate together occupies can never be used
        let demanded: usize = items
            .iter()
            .fold(0, |total, item| total.saturating_add(item.cells));
        let budget = self.config.budget_cells(capacity_units).min(demanded);
        let selection =
            knapsack::solve(&items, budget, cancel).ok_or(OptimizeError::Cancelled)?;

        let plans = assemble(selection.indices.iter().map(|&i| &candidates[i]));

        debug!(
            origin,
            capacity,
            candidates = candidates.len(),
            budget,
            selected = selection.indices.len(),
            destinations = plans.len(),
            profit = selection.value,
            "optimization complete"
        );

        Ok(OptimizationResult {
            origin: origin.to_string(),
            capacity: capacity_units,
            plans,
            stats,
        })
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
