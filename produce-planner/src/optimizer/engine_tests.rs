//! Unit tests for the optimization pipeline.

use super::*;
use crate::domain::Location;
use crate::optimizer::CELL_EPSILON;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;

fn good(name: &str, price: f64, growing: u32, cost: f64, weight: f64, transport: f64) -> Good {
    Good::new(name, price, growing, cost, weight, transport).unwrap()
}

fn demand(destination: &str, good: &str, quantity: i64) -> DemandRecord {
    DemandRecord::new(destination, good, quantity).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Fixed distances from a single origin, for testing without a graph.
struct FixedDistances {
    origin: &'static str,
    distances: HashMap<&'static str, u64>,
}

impl FixedDistances {
    fn new(origin: &'static str, distances: &[(&'static str, u64)]) -> Self {
        Self {
            origin,
            distances: distances.iter().copied().collect(),
        }
    }
}

impl DistanceOracle for FixedDistances {
    fn contains(&self, location: &str) -> bool {
        location == self.origin || self.distances.contains_key(location)
    }

    fn distance(&self, from: &str, to: &str) -> Option<u64> {
        if from != self.origin {
            return None;
        }
        if from == to {
            return Some(0);
        }
        self.distances.get(to).copied()
    }
}

/// A, B, C with A-B=500, B-C=500, A-C=1200.
fn triangle() -> LocationGraph {
    let mut graph = LocationGraph::new();
    for name in ["A", "B", "C"] {
        graph.add_location(Location::new(name).unwrap());
    }
    graph.add_route("A", "B", 500).unwrap();
    graph.add_route("B", "C", 500).unwrap();
    graph.add_route("A", "C", 1200).unwrap();
    graph
}

/// Two destinations with transport-free goods, so profits are easy to follow.
///
/// Apple earns 2 per unit and weighs 1; Brick earns 10 per unit and weighs 5.
/// X is one day away (retention 0.9), Y two days (retention 0.8).
fn two_destinations() -> (FixedDistances, ShipmentOptimizer) {
    let oracle = FixedDistances::new("O", &[("X", 100), ("Y", 1000)]);
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Apple", 3.0, 0, 1.0, 1.0, 0.0));
    optimizer.add_good(good("Brick", 10.0, 0, 0.0, 5.0, 0.0));
    optimizer.set_demand(demand("X", "Apple", 30));
    optimizer.set_demand(demand("Y", "Apple", 30));
    optimizer.set_demand(demand("Y", "Brick", 8));
    (oracle, optimizer)
}

#[test]
fn worked_example_through_graph() {
    let graph = triangle();
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Wheat", 12.0, 30, 2.0, 1.0, 0.002));
    optimizer.set_demand(demand("C", "Wheat", 100));

    let result = optimizer.optimize(&graph, "A", 50).unwrap();

    assert_eq!(result.plans.len(), 1);
    let plan = &result.plans[0];
    assert_eq!(plan.destination, "C");
    assert_eq!(plan.items.get("Wheat"), Some(&50));
    assert_eq!(plan.estimated_days, 2);
    assert!(close(plan.total_weight, 50.0));
    // base 400 × retention 0.56
    assert!(close(plan.total_profit, 224.0));
    assert_eq!(result.stats.emitted, 1);
}

#[test]
fn transport_cost_can_make_shipment_unprofitable() {
    let graph = triangle();
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Wheat", 10.0, 30, 2.0, 1.0, 0.01));
    optimizer.set_demand(demand("C", "Wheat", 100));

    // 50×10 − 50×2 − 0.01×1000×50×1 = −100
    let result = optimizer.optimize(&graph, "A", 50).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.stats.unprofitable, 1);
}

#[test]
fn picks_best_combination() {
    let (oracle, optimizer) = two_destinations();

    // X Apple 54 (30 kg), Y Apple 48 (30 kg), Y Brick 64 (40 kg)
    let result = optimizer.optimize(&oracle, "O", 70).unwrap();

    assert_eq!(result.plans.len(), 2);
    let x = result.plan_for("X").unwrap();
    let y = result.plan_for("Y").unwrap();
    assert_eq!(x.items.get("Apple"), Some(&30));
    assert_eq!(y.items.get("Brick"), Some(&8));
    assert!(y.items.get("Apple").is_none());
    assert!(close(result.total_profit(), 118.0));
    assert!(close(result.total_weight(), 70.0));
}

#[test]
fn single_high_value_shipment_beats_two_small_ones() {
    let (oracle, optimizer) = two_destinations();

    let result = optimizer.optimize(&oracle, "O", 50).unwrap();

    assert_eq!(result.plans.len(), 1);
    assert_eq!(result.plans[0].destination, "Y");
    assert_eq!(result.plans[0].items.get("Brick"), Some(&8));
    assert!(close(result.total_profit(), 64.0));
}

#[test]
fn quantity_capped_by_capacity() {
    let (oracle, optimizer) = two_destinations();

    // Only 2 bricks fit; X Apple capped at 12 units
    let result = optimizer.optimize(&oracle, "O", 12).unwrap();
    assert!(result.total_weight() <= 12.0);
    let total_units: u64 = result.plans.iter().map(|p| p.unit_count()).sum();
    assert!(total_units > 0);
}

#[test]
fn capacity_below_lightest_unit_is_empty() {
    let oracle = FixedDistances::new("O", &[("X", 100)]);
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Melon", 5.0, 0, 1.0, 8.0, 0.0));
    optimizer.set_demand(demand("X", "Melon", 10));

    let result = optimizer.optimize(&oracle, "O", 7).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.stats.over_capacity, 1);
}

#[test]
fn unreachable_destination_contributes_nothing() {
    let mut graph = triangle();
    graph.add_location(Location::new("Island").unwrap());

    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Fish", 5.0, 0, 1.0, 1.0, 0.0));
    optimizer.set_demand(demand("Island", "Fish", 10));
    optimizer.set_demand(demand("Atlantis", "Fish", 10));
    optimizer.set_demand(demand("B", "Fish", 10));

    let result = optimizer.optimize(&graph, "A", 100).unwrap();
    assert_eq!(result.plans.len(), 1);
    assert_eq!(result.plans[0].destination, "B");
    assert_eq!(result.stats.unreachable, 2);
    assert_eq!(result.stats.considered, 3);
}

#[test]
fn deliveries_over_day_ceiling_skipped() {
    // 7 days × 900 = 6300
    let oracle = FixedDistances::new("O", &[("Near", 6300), ("Far", 6301)]);
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Salt", 5.0, 0, 1.0, 1.0, 0.0));
    optimizer.set_demand(demand("Near", "Salt", 5));
    optimizer.set_demand(demand("Far", "Salt", 5));

    let result = optimizer.optimize(&oracle, "O", 100).unwrap();
    assert_eq!(result.plans.len(), 1);
    assert_eq!(result.plans[0].destination, "Near");
    assert_eq!(result.plans[0].estimated_days, 7);
    assert_eq!(result.stats.too_slow, 1);
}

#[test]
fn zero_distance_destination_is_infeasible() {
    let oracle = FixedDistances::new("O", &[("Here", 0)]);
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Salt", 5.0, 0, 1.0, 1.0, 0.0));
    optimizer.set_demand(demand("Here", "Salt", 5));

    let result = optimizer.optimize(&oracle, "O", 100).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.stats.zero_distance, 1);
    assert_eq!(result.stats.too_slow, 0);
}

#[test]
fn origin_demand_ignored() {
    let graph = triangle();
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Corn", 5.0, 0, 1.0, 1.0, 0.0));
    optimizer.set_demand(demand("A", "Corn", 10));

    let result = optimizer.optimize(&graph, "A", 100).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.stats.considered, 0);
}

#[test]
fn unknown_good_skipped() {
    let graph = triangle();
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Corn", 5.0, 0, 1.0, 1.0, 0.0));
    optimizer.set_demand(demand("B", "Corn", 10));
    optimizer.set_demand(demand("B", "Unobtainium", 10));

    let result = optimizer.optimize(&graph, "A", 100).unwrap();
    assert_eq!(result.plans.len(), 1);
    assert_eq!(result.plans[0].items.len(), 1);
    assert_eq!(result.stats.unknown_good, 1);
}

#[test]
fn rejects_non_positive_capacity() {
    let graph = triangle();
    let optimizer = ShipmentOptimizer::default();

    assert_eq!(
        optimizer.optimize(&graph, "A", 0),
        Err(OptimizeError::NonPositiveCapacity(0))
    );
    assert_eq!(
        optimizer.optimize(&graph, "A", -5),
        Err(OptimizeError::NonPositiveCapacity(-5))
    );
}

#[test]
fn rejects_oversized_capacity() {
    let graph = triangle();
    let optimizer = ShipmentOptimizer::default();
    let capacity = i64::from(u32::MAX) + 1;
    assert_eq!(
        optimizer.optimize(&graph, "A", capacity),
        Err(OptimizeError::CapacityTooLarge(capacity))
    );
}

#[test]
fn rejects_unknown_origin() {
    let graph = triangle();
    let optimizer = ShipmentOptimizer::default();
    assert_eq!(
        optimizer.optimize(&graph, "Nowhere", 10),
        Err(OptimizeError::UnknownOrigin("Nowhere".into()))
    );
}

#[test]
fn empty_catalog_is_empty_result() {
    let graph = triangle();
    let optimizer = ShipmentOptimizer::default();
    let result = optimizer.optimize(&graph, "A", 10).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.origin, "A");
    assert_eq!(result.capacity, 10);
}

#[test]
fn repeated_calls_are_identical() {
    let (oracle, optimizer) = two_destinations();
    let first = optimizer.optimize(&oracle, "O", 70).unwrap();
    let second = optimizer.optimize(&oracle, "O", 70).unwrap();
    assert_eq!(first, second);
}

#[test]
fn later_demand_overwrites() {
    let mut optimizer = ShipmentOptimizer::default();
    assert_eq!(optimizer.set_demand(demand("X", "Corn", 5)), None);
    assert_eq!(optimizer.set_demand(demand("X", "Corn", 9)), Some(5));
    assert_eq!(optimizer.demand_count(), 1);
    assert_eq!(optimizer.demand_at("X").unwrap().get("Corn"), Some(&9));
}

#[test]
fn later_good_overwrites() {
    let mut optimizer = ShipmentOptimizer::default();
    assert!(optimizer.add_good(good("Corn", 5.0, 0, 1.0, 1.0, 0.0)).is_none());
    let previous = optimizer.add_good(good("Corn", 7.0, 0, 1.0, 1.0, 0.0));
    assert_eq!(previous.map(|g| g.unit_price()), Some(5.0));
    assert_eq!(optimizer.good("Corn").map(|g| g.unit_price()), Some(7.0));
    assert_eq!(optimizer.goods().count(), 1);
}

#[test]
fn catalog_read_access_is_ordered() {
    let (_, optimizer) = two_destinations();
    let destinations: Vec<&str> = optimizer.destinations().collect();
    assert_eq!(destinations, vec!["X", "Y"]);
    let names: Vec<&str> = optimizer.goods().map(|g| g.name()).collect();
    assert_eq!(names, vec!["Apple", "Brick"]);
}

#[test]
fn fractional_weights_round_up_to_cells() {
    // 3 × 0.4 = 1.2 kg occupies 2 cells at whole-unit resolution
    let oracle = FixedDistances::new("O", &[("X", 100), ("Y", 100)]);
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Herb", 10.0, 0, 0.0, 0.4, 0.0));
    optimizer.set_demand(demand("X", "Herb", 3));
    optimizer.set_demand(demand("Y", "Herb", 3));

    let result = optimizer.optimize(&oracle, "O", 3).unwrap();
    assert_eq!(result.plans.len(), 1);

    // At tenth-unit resolution both 1.2 kg shipments fit in 3 kg
    let config = OptimizerConfig {
        capacity_resolution: 10,
        ..OptimizerConfig::default()
    };
    let mut fine = ShipmentOptimizer::new(config);
    fine.add_good(good("Herb", 10.0, 0, 0.0, 0.4, 0.0));
    fine.set_demand(demand("X", "Herb", 3));
    fine.set_demand(demand("Y", "Herb", 3));

    let result = fine.optimize(&oracle, "O", 3).unwrap();
    assert_eq!(result.plans.len(), 2);
    assert!(result.total_weight() <= 3.0);
}

#[test]
fn float_noise_within_cell_tolerance() {
    // 30 × 0.1 = 3.0000000000000004 is charged 3 cells, so both shipments fit
    let oracle = FixedDistances::new("O", &[("X", 100), ("Y", 100)]);
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Seed", 10.0, 0, 0.0, 0.1, 0.0));
    optimizer.set_demand(demand("X", "Seed", 30));
    optimizer.set_demand(demand("Y", "Seed", 30));

    let result = optimizer.optimize(&oracle, "O", 6).unwrap();
    assert_eq!(result.plans.len(), 2);
    assert!(result.total_weight() <= 6.0 + 2.0 * CELL_EPSILON);
}

#[test]
fn huge_capacity_sized_to_demand() {
    let oracle = FixedDistances::new("O", &[("X", 100)]);
    let mut optimizer = ShipmentOptimizer::default();
    optimizer.add_good(good("Salt", 5.0, 0, 1.0, 1.0, 0.0));
    optimizer.set_demand(demand("X", "Salt", 1));

    let small = optimizer.optimize(&oracle, "O", 100).unwrap();
    let huge = optimizer
        .optimize(&oracle, "O", i64::from(u32::MAX))
        .unwrap();

    assert_eq!(huge.plans, small.plans);
    assert_eq!(huge.plans[0].items.get("Salt"), Some(&1));
    assert_eq!(huge.capacity, u32::MAX);
}

#[test]
fn cancelled_run_stops() {
    let (oracle, optimizer) = two_destinations();
    let cancel = AtomicBool::new(true);
    assert_eq!(
        optimizer.optimize_until(&oracle, "O", 70, &cancel),
        Err(OptimizeError::Cancelled)
    );

    let cancel = AtomicBool::new(false);
    let result = optimizer.optimize_until(&oracle, "O", 70, &cancel).unwrap();
    assert_eq!(result, optimizer.optimize(&oracle, "O", 70).unwrap());
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    const DESTINATIONS: [&str; 4] = ["D0", "D1", "D2", "D3"];

    #[derive(Debug, Clone)]
    struct Scenario {
        distances: Vec<u64>,
        goods: Vec<(u32, u32, u32, u32)>,
        demand: Vec<(usize, usize, u32)>,
    }

    fn arb_scenario() -> impl Strategy<Value = Scenario> {
        (
            prop::collection::vec(1u64..9000, DESTINATIONS.len()),
            prop::collection::vec((1u32..50, 0u32..150, 0u32..20, 1u32..40), 1..4),
            prop::collection::vec((0usize..4, 0usize..4, 1u32..60), 0..12),
        )
            .prop_map(|(distances, goods, demand)| Scenario {
                distances,
                goods,
                demand,
            })
    }

    fn build(scenario: &Scenario) -> (FixedDistances, ShipmentOptimizer) {
        let pairs: Vec<(&'static str, u64)> = DESTINATIONS
            .iter()
            .copied()
            .zip(scenario.distances.iter().copied())
            .collect();
        let oracle = FixedDistances::new("O", &pairs);

        let mut optimizer = ShipmentOptimizer::default();
        for (i, &(price, growing, cost, weight_tenths)) in scenario.goods.iter().enumerate() {
            optimizer.add_good(good(
                &format!("G{i}"),
                f64::from(price),
                growing,
                f64::from(cost),
                f64::from(weight_tenths) / 10.0,
                0.001,
            ));
        }
        for &(dest, good_idx, quantity) in &scenario.demand {
            optimizer.set_demand(demand(DESTINATIONS[dest], &format!("G{good_idx}"), i64::from(quantity)));
        }
        (oracle, optimizer)
    }

    proptest! {
        /// Plans never exceed the vehicle capacity
        #[test]
        fn within_capacity(scenario in arb_scenario(), capacity in 1i64..120) {
            let (oracle, optimizer) = build(&scenario);
            let result = optimizer.optimize(&oracle, "O", capacity).unwrap();
            let shipments: usize = result.plans.iter().map(|p| p.items.len()).sum();
            prop_assert!(result.total_weight() <= capacity as f64 + shipments as f64 * CELL_EPSILON);
        }

        /// Every plan meets the day ceiling and its ETA is its destination's delivery time
        #[test]
        fn eta_within_ceiling(scenario in arb_scenario(), capacity in 1i64..120) {
            let (oracle, optimizer) = build(&scenario);
            let config = optimizer.config().clone();
            let result = optimizer.optimize(&oracle, "O", capacity).unwrap();
            for plan in &result.plans {
                prop_assert!(plan.estimated_days <= config.max_delivery_days);
                let distance = oracle.distance("O", &plan.destination).unwrap();
                prop_assert_eq!(Some(plan.estimated_days), config.delivery_days(distance));
                prop_assert!(plan.total_profit > 0.0);
            }
        }

        /// Shipped quantities never exceed demand
        #[test]
        fn within_demand(scenario in arb_scenario(), capacity in 1i64..120) {
            let (oracle, optimizer) = build(&scenario);
            let result = optimizer.optimize(&oracle, "O", capacity).unwrap();
            for plan in &result.plans {
                let wanted = optimizer.demand_at(&plan.destination).unwrap();
                for (good, quantity) in &plan.items {
                    prop_assert!(quantity <= wanted.get(good).unwrap());
                }
            }
        }

        /// Same inputs, same plans
        #[test]
        fn idempotent(scenario in arb_scenario(), capacity in 1i64..120) {
            let (oracle, optimizer) = build(&scenario);
            let first = optimizer.optimize(&oracle, "O", capacity).unwrap();
            let second = optimizer.optimize(&oracle, "O", capacity).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
