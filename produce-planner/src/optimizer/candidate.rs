//! Candidate generation and the time-adjusted profit model.
//!
//! A candidate is one (good, destination) shipment at the largest quantity
//! the vehicle and the demand allow. Candidates are indivisible in the
//! selection step.

use std::collections::BTreeMap;

use tracing::trace;

use super::config::OptimizerConfig;
use super::engine::DistanceOracle;
use crate::domain::Good;

/// One feasible shipment with its profit score.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub good: String,
    pub destination: String,
    pub quantity: u32,

    /// `quantity × unit weight`.
    pub total_weight: f64,

    /// Knapsack cells the shipment occupies.
    pub cells: usize,

    /// Time-adjusted profit.
    pub profit: f64,

    pub delivery_days: u32,
    pub distance: u64,
}

/// Counts of (good, destination) demand pairs by outcome.
///
/// Explains an empty or thin result without re-running the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateStats {
    /// Demand pairs looked at.
    pub considered: usize,

    /// Pairs that became candidates.
    pub emitted: usize,

    /// Destination not connected to the origin.
    pub unreachable: usize,

    /// Delivery would exceed the day ceiling.
    pub too_slow: usize,

    /// Destination reported at distance zero from the origin.
    pub zero_distance: usize,

    /// Good missing from the catalog.
    pub unknown_good: usize,

    /// Not even one unit fits the vehicle.
    pub over_capacity: usize,

    /// Base profit not positive.
    pub unprofitable: usize,
}

/// Profit before time decay.
///
/// Revenue and production cost scale with quantity; transport cost scales
/// with quantity, unit weight and distance.
pub fn base_profit(good: &Good, quantity: u32, distance: u64) -> f64 {
    let quantity = f64::from(quantity);
    let revenue = quantity * good.unit_price();
    let production = quantity * good.production_cost();
    let transport = good.transport_cost() * distance as f64 * quantity * good.weight();
    revenue - production - transport
}

/// Fraction of base profit kept after `delivery_days` in transit.
pub fn retention(good: &Good, delivery_days: u32, config: &OptimizerConfig) -> f64 {
    let freshness = (1.0 - f64::from(delivery_days) * config.freshness_decay_per_day).max(0.0);
    let growth = (1.0 - f64::from(good.growing_time()) / config.growing_time_divisor).max(0.0);
    (freshness * growth).max(config.minimum_retention_fraction)
}

/// Time-adjusted profit. Non-positive base profit scores zero.
pub fn scored_profit(
    base_profit: f64,
    good: &Good,
    delivery_days: u32,
    config: &OptimizerConfig,
) -> f64 {
    if base_profit <= 0.0 {
        return 0.0;
    }
    base_profit * retention(good, delivery_days, config)
}

/// Largest quantity that satisfies both the demand and the vehicle.
pub fn max_quantity(good: &Good, requested: u32, capacity: u32) -> u32 {
    let fits = (f64::from(capacity) / good.weight()).floor();
    if fits >= f64::from(requested) {
        requested
    } else {
        fits as u32
    }
}

/// Inputs borrowed for one generation pass.
pub(super) struct Generation<'a, G> {
    pub oracle: &'a G,
    pub goods: &'a BTreeMap<String, Good>,
    pub demand: &'a BTreeMap<String, BTreeMap<String, u32>>,
    pub config: &'a OptimizerConfig,
}

impl<G: DistanceOracle> Generation<'_, G> {
    /// Emit at most one candidate per (good, destination) pair.
    ///
    /// Destinations and goods are visited in name order, so the output is
    /// deterministic for a given state.
    pub(super) fn run(&self, origin: &str, capacity: u32) -> (Vec<Candidate>, CandidateStats) {
        let mut candidates = Vec::new();
        let mut stats = CandidateStats::default();

        for (destination, wanted) in self.demand {
            if destination == origin {
                continue;
            }
            stats.considered += wanted.len();

            let Some(distance) = self.oracle.distance(origin, destination) else {
                trace!(%destination, "destination unreachable");
                stats.unreachable += wanted.len();
                continue;
            };

            let Some(delivery_days) = self.config.delivery_days(distance) else {
                trace!(%destination, "destination at zero distance");
                stats.zero_distance += wanted.len();
                continue;
            };
            if delivery_days > self.config.max_delivery_days {
                trace!(%destination, distance, delivery_days, "delivery too slow");
                stats.too_slow += wanted.len();
                continue;
            }

            for (good_name, &requested) in wanted {
                let Some(good) = self.goods.get(good_name) else {
                    stats.unknown_good += 1;
                    continue;
                };

                let quantity = max_quantity(good, requested, capacity);
                if quantity == 0 {
                    stats.over_capacity += 1;
                    continue;
                }

                let base = base_profit(good, quantity, distance);
                if base <= 0.0 {
                    stats.unprofitable += 1;
                    continue;
                }

                let total_weight = f64::from(quantity) * good.weight();
                candidates.push(Candidate {
                    good: good_name.clone(),
                    destination: destination.clone(),
                    quantity,
                    total_weight,
                    cells: self.config.weight_cells(total_weight),
                    profit: scored_profit(base, good, delivery_days, self.config),
                    delivery_days,
                    distance,
                });
                stats.emitted += 1;
            }
        }

        (candidates, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheat() -> Good {
        Good::new("Wheat", 10.0, 30, 2.0, 1.0, 0.01).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn base_profit_worked_example() {
        let wheat = Good::new("Wheat", 12.0, 30, 2.0, 1.0, 0.002).unwrap();
        // 50×12 − 50×2 − 0.002×1000×50×1
        assert!(close(base_profit(&wheat, 50, 1000), 400.0));
    }

    #[test]
    fn transport_can_eat_all_profit() {
        // 50×10 − 50×2 − 0.01×1000×50×1
        assert!(close(base_profit(&wheat(), 50, 1000), -100.0));
    }

    #[test]
    fn transport_cost_scales_with_weight() {
        let heavy = Good::new("Melon", 10.0, 30, 2.0, 4.0, 0.01).unwrap();
        // 10×10 − 10×2 − 0.01×100×10×4
        assert!(close(base_profit(&heavy, 10, 100), 40.0));
    }

    #[test]
    fn retention_worked_example() {
        let config = OptimizerConfig::default();
        // max(0.5, 0.8 × 0.7)
        assert!(close(retention(&wheat(), 2, &config), 0.56));
        assert!(close(scored_profit(400.0, &wheat(), 2, &config), 224.0));
    }

    #[test]
    fn retention_floor_applies() {
        let config = OptimizerConfig::default();
        let slow = Good::new("Oak", 1.0, 250, 0.0, 1.0, 0.0).unwrap();

        // Growth factor clamps to 0, so only the floor remains
        assert!(close(retention(&slow, 1, &config), 0.5));
        // Freshness clamps to 0 after ten days
        assert!(close(retention(&wheat(), 12, &config), 0.5));
    }

    #[test]
    fn retention_floor_is_configurable() {
        let config = OptimizerConfig {
            minimum_retention_fraction: 0.0,
            ..OptimizerConfig::default()
        };
        assert!(close(retention(&wheat(), 12, &config), 0.0));
    }

    #[test]
    fn non_positive_base_scores_zero() {
        let config = OptimizerConfig::default();
        assert_eq!(scored_profit(0.0, &wheat(), 1, &config), 0.0);
        assert_eq!(scored_profit(-10.0, &wheat(), 1, &config), 0.0);
    }

    #[test]
    fn max_quantity_limited_by_demand_or_capacity() {
        let half = Good::new("Salt", 1.0, 0, 0.0, 0.5, 0.0).unwrap();
        assert_eq!(max_quantity(&wheat(), 100, 50), 50);
        assert_eq!(max_quantity(&wheat(), 20, 50), 20);
        assert_eq!(max_quantity(&half, 1000, 7), 14);

        let heavy = Good::new("Anvil", 1.0, 0, 0.0, 60.0, 0.0).unwrap();
        assert_eq!(max_quantity(&heavy, 3, 50), 0);
    }
}
