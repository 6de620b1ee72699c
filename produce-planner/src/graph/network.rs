//! Graph storage: locations, the name index and adjacency lists.

use std::collections::HashMap;

use tracing::trace;

use super::GraphError;
use crate::domain::{Location, LocationId};

/// Outgoing half of an undirected route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Edge {
    pub(super) to: LocationId,
    pub(super) distance: u32,
}

/// An undirected route, as listed by [`LocationGraph::routes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub from: String,
    pub to: String,
    pub distance: u32,
}

/// An undirected weighted graph of locations.
///
/// Routes are symmetric: adding A–B also makes B–A available at the same
/// distance. Adding a route for a pair that already has one overwrites the
/// distance.
///
/// # Examples
///
/// ```
/// use produce_planner::domain::Location;
/// use produce_planner::graph::LocationGraph;
///
/// let mut graph = LocationGraph::new();
/// graph.add_location(Location::new("A").unwrap());
/// graph.add_location(Location::new("B").unwrap());
/// graph.add_route("A", "B", 500).unwrap();
///
/// assert_eq!(graph.shortest_distance("A", "B"), Some(500));
/// assert_eq!(graph.shortest_distance("B", "A"), Some(500));
/// assert!(graph.add_route("A", "Nowhere", 10).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocationGraph {
    locations: Vec<Location>,
    index: HashMap<String, LocationId>,
    adjacency: Vec<Vec<Edge>>,
}

impl LocationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location and return its handle.
    ///
    /// Registering a name that already exists updates its coordinates and
    /// keeps the existing handle and routes.
    pub fn add_location(&mut self, location: Location) -> LocationId {
        if let Some(&id) = self.index.get(location.name()) {
            self.locations[id.index()].set_coordinates(location.coordinates());
            return id;
        }

        let id = LocationId(self.locations.len());
        self.index.insert(location.name().to_string(), id);
        self.locations.push(location);
        self.adjacency.push(Vec::new());
        id
    }

    /// Add or overwrite the undirected route between two known locations.
    pub fn add_route(&mut self, a: &str, b: &str, distance: u32) -> Result<(), GraphError> {
        let from = self
            .id(a)
            .ok_or_else(|| GraphError::UnknownLocation(a.to_string()))?;
        let to = self
            .id(b)
            .ok_or_else(|| GraphError::UnknownLocation(b.to_string()))?;

        if distance == 0 {
            return Err(GraphError::ZeroDistance {
                from: a.to_string(),
                to: b.to_string(),
            });
        }

        self.upsert_edge(from, to, distance);
        if from != to {
            self.upsert_edge(to, from, distance);
        }

        trace!(from = a, to = b, distance, "route added");
        Ok(())
    }

    fn upsert_edge(&mut self, from: LocationId, to: LocationId, distance: u32) {
        let edges = &mut self.adjacency[from.index()];
        match edges.iter_mut().find(|e| e.to == to) {
            Some(edge) => edge.distance = distance,
            None => edges.push(Edge { to, distance }),
        }
    }

    /// Look up the handle for a location name.
    pub fn id(&self, name: &str) -> Option<LocationId> {
        self.index.get(name).copied()
    }

    /// Look up a location by name.
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.id(name).map(|id| &self.locations[id.index()])
    }

    /// Returns true if the location is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Name of the location behind a handle.
    ///
    /// Panics if the handle did not come from this graph.
    pub fn name(&self, id: LocationId) -> &str {
        self.locations[id.index()].name()
    }

    /// All locations in registration order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter()
    }

    pub(super) fn neighbors(&self, id: LocationId) -> &[Edge] {
        &self.adjacency[id.index()]
    }

    /// Every route exactly once, ordered by endpoint names.
    ///
    /// Each route is reported with the lexically smaller name first.
    pub fn routes(&self) -> Vec<Route> {
        let mut routes: Vec<Route> = self
            .adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| {
                edges.iter().filter_map(move |edge| {
                    let from_name = self.locations[from].name();
                    let to_name = self.name(edge.to);
                    (from_name <= to_name).then(|| Route {
                        from: from_name.to_string(),
                        to: to_name.to_string(),
                        distance: edge.distance,
                    })
                })
            })
            .collect();

        routes.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));
        routes
    }

    /// Number of undirected routes.
    pub fn route_count(&self) -> usize {
        self.adjacency
            .iter()
            .enumerate()
            .map(|(from, edges)| edges.iter().filter(|e| from <= e.to.index()).count())
            .sum()
    }

    /// Number of registered locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if no locations are registered.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
