//! Weighted location graph with shortest-path queries.
//!
//! Locations are registered by name and addressed internally by dense
//! `LocationId` handles. Routes are undirected with positive integer
//! distances. Distance queries use Dijkstra's algorithm over an index-based
//! adjacency list; "unreachable" is reported as `None`, never as an error.

mod dijkstra;
mod error;
mod network;

pub use dijkstra::ShortestPath;
pub use error::GraphError;
pub use network::{LocationGraph, Route};
