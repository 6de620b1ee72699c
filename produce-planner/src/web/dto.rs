//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{Route, ShortestPath};
use crate::optimizer::{CandidateStats, OptimizationResult, TransportPlan};

/// Request to compute transport plans.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Where the producer starts
    pub origin: String,

    /// Vehicle capacity in weight units
    pub capacity: i64,
}

/// Request to add or overwrite a route.
#[derive(Debug, Deserialize)]
pub struct AddRouteRequest {
    pub from: String,
    pub to: String,

    /// Must be positive
    pub distance: i64,
}

/// Query for a shortest path.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub from: String,
    pub to: String,
}

/// A route in listings.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RouteResult {
    pub from: String,
    pub to: String,
    pub distance: u32,
}

impl From<Route> for RouteResult {
    fn from(route: Route) -> Self {
        Self {
            from: route.from,
            to: route.to,
            distance: route.distance,
        }
    }
}

/// Response listing all routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteResult>,
}

/// Response for a shortest path query.
#[derive(Debug, Serialize, Deserialize)]
pub struct PathResponse {
    /// Locations from origin to target
    pub locations: Vec<String>,

    /// Total distance
    pub distance: u64,
}

impl From<ShortestPath> for PathResponse {
    fn from(path: ShortestPath) -> Self {
        Self {
            locations: path.locations,
            distance: path.distance,
        }
    }
}

/// One destination's plan.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub destination: String,

    /// Good name → units
    pub items: BTreeMap<String, u32>,

    pub total_profit: f64,
    pub total_weight: f64,
    pub estimated_days: u32,
}

impl From<TransportPlan> for PlanResult {
    fn from(plan: TransportPlan) -> Self {
        Self {
            destination: plan.destination,
            items: plan.items,
            total_profit: plan.total_profit,
            total_weight: plan.total_weight,
            estimated_days: plan.estimated_days,
        }
    }
}

/// Response for a plan request.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub origin: String,
    pub capacity: u32,
    pub plans: Vec<PlanResult>,
    pub total_profit: f64,
    pub total_weight: f64,

    /// Why demand pairs were or were not shipped
    pub stats: StatsResult,
}

/// Candidate counts by outcome.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResult {
    pub considered: usize,
    pub emitted: usize,
    pub unreachable: usize,
    pub too_slow: usize,
    pub zero_distance: usize,
    pub unknown_good: usize,
    pub over_capacity: usize,
    pub unprofitable: usize,
}

impl From<CandidateStats> for StatsResult {
    fn from(stats: CandidateStats) -> Self {
        Self {
            considered: stats.considered,
            emitted: stats.emitted,
            unreachable: stats.unreachable,
            too_slow: stats.too_slow,
            zero_distance: stats.zero_distance,
            unknown_good: stats.unknown_good,
            over_capacity: stats.over_capacity,
            unprofitable: stats.unprofitable,
        }
    }
}

impl From<OptimizationResult> for PlanResponse {
    fn from(result: OptimizationResult) -> Self {
        let total_profit = result.total_profit();
        let total_weight = result.total_weight();
        Self {
            origin: result.origin,
            capacity: result.capacity,
            plans: result.plans.into_iter().map(PlanResult::from).collect(),
            total_profit,
            total_weight,
            stats: result.stats.into(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
