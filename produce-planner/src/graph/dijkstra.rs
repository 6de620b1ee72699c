//! Single-pair shortest paths.
//!
//! All route distances are positive, so Dijkstra's algorithm with a
//! binary-heap frontier is exact. The search stops as soon as the target is
//! settled. Stale heap entries are skipped on pop instead of being decreased
//! in place.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::trace;

use super::LocationGraph;
use crate::domain::LocationId;

/// A minimum-distance path between two locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPath {
    /// Location names from origin to target, both inclusive.
    pub locations: Vec<String>,

    /// Sum of route distances along the path.
    pub distance: u64,
}

impl ShortestPath {
    /// Number of routes travelled.
    pub fn hops(&self) -> usize {
        self.locations.len().saturating_sub(1)
    }
}

/// Settled search state for one (source, target) query.
struct Settled {
    distance: u64,
    predecessor: Vec<Option<LocationId>>,
}

impl LocationGraph {
    /// Minimum total distance between two locations.
    ///
    /// Returns `None` when either location is unknown or no path connects
    /// them. A known location is at distance 0 from itself.
    pub fn shortest_distance(&self, from: &str, to: &str) -> Option<u64> {
        let source = self.id(from)?;
        let target = self.id(to)?;
        self.search(source, target).map(|settled| settled.distance)
    }

    /// The path realising [`shortest_distance`](Self::shortest_distance).
    ///
    /// Ties between equal-length paths resolve deterministically by the
    /// order locations leave the frontier.
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<ShortestPath> {
        let source = self.id(from)?;
        let target = self.id(to)?;
        let settled = self.search(source, target)?;

        let mut ids = vec![target];
        let mut current = target;
        while let Some(prev) = settled.predecessor[current.index()] {
            ids.push(prev);
            current = prev;
        }
        ids.reverse();

        Some(ShortestPath {
            locations: ids.into_iter().map(|id| self.name(id).to_string()).collect(),
            distance: settled.distance,
        })
    }

    fn search(&self, source: LocationId, target: LocationId) -> Option<Settled> {
        let mut distance = vec![u64::MAX; self.len()];
        let mut predecessor: Vec<Option<LocationId>> = vec![None; self.len()];
        let mut frontier = BinaryHeap::new();

        distance[source.index()] = 0;
        frontier.push(Reverse((0u64, source)));

        let mut settled = 0usize;
        while let Some(Reverse((dist, node))) = frontier.pop() {
            if dist > distance[node.index()] {
                continue;
            }
            settled += 1;

            if node == target {
                trace!(
                    from = %self.name(source),
                    to = %self.name(target),
                    distance = dist,
                    settled,
                    "shortest path found"
                );
                return Some(Settled {
                    distance: dist,
                    predecessor,
                });
            }

            for edge in self.neighbors(node) {
                let candidate = dist + u64::from(edge.distance);
                let slot = &mut distance[edge.to.index()];
                if candidate < *slot {
                    *slot = candidate;
                    predecessor[edge.to.index()] = Some(node);
                    frontier.push(Reverse((candidate, edge.to)));
                }
            }
        }

        None
    }
}
