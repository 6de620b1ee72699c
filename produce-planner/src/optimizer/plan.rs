//! Transport plans assembled from selected candidates.

use std::collections::BTreeMap;

use super::candidate::{Candidate, CandidateStats};

/// Everything shipped to one destination in a single optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportPlan {
    pub destination: String,

    /// Good name → units shipped.
    pub items: BTreeMap<String, u32>,

    pub total_profit: f64,
    pub total_weight: f64,

    /// Slowest good's delivery days. Goods travel together, so the plan
    /// arrives when its slowest item does.
    pub estimated_days: u32,
}

impl TransportPlan {
    fn new(destination: &str) -> Self {
        Self {
            destination: destination.to_string(),
            items: BTreeMap::new(),
            total_profit: 0.0,
            total_weight: 0.0,
            estimated_days: 0,
        }
    }

    fn absorb(&mut self, candidate: &Candidate) {
        *self.items.entry(candidate.good.clone()).or_default() += candidate.quantity;
        self.total_profit += candidate.profit;
        self.total_weight += candidate.total_weight;
        self.estimated_days = self.estimated_days.max(candidate.delivery_days);
    }

    /// Total units across all goods.
    pub fn unit_count(&self) -> u64 {
        self.items.values().map(|&q| u64::from(q)).sum()
    }
}

/// Group selected candidates by destination, ordered by destination name.
pub fn assemble<'a>(selected: impl IntoIterator<Item = &'a Candidate>) -> Vec<TransportPlan> {
    let mut plans: BTreeMap<&str, TransportPlan> = BTreeMap::new();
    for candidate in selected {
        plans
            .entry(candidate.destination.as_str())
            .or_insert_with(|| TransportPlan::new(&candidate.destination))
            .absorb(candidate);
    }
    plans.into_values().collect()
}

/// Outcome of one optimization call.
///
/// An empty plan list is a valid outcome: nothing was feasible or
/// profitable. `stats` says why.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    pub origin: String,
    pub capacity: u32,

    /// Plans ordered by destination name.
    pub plans: Vec<TransportPlan>,

    pub stats: CandidateStats,
}

impl OptimizationResult {
    /// Returns true if nothing is to be shipped.
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn total_profit(&self) -> f64 {
        self.plans.iter().map(|p| p.total_profit).sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.plans.iter().map(|p| p.total_weight).sum()
    }

    /// Look up the plan for a destination.
    pub fn plan_for(&self, destination: &str) -> Option<&TransportPlan> {
        self.plans.iter().find(|p| p.destination == destination)
    }
}
