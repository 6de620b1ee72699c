//! Load a sectioned data file into a graph and an optimizer.

use std::path::Path;

use tracing::{info, warn};

use super::section::{self, Section};
use crate::domain::RecordError;
use crate::graph::{GraphError, LocationGraph};
use crate::optimizer::{OptimizerConfig, ShipmentOptimizer};

/// Failure to read the data source as a whole.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single line was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RejectReason {
    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A dropped line and the reason it was dropped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}: {reason}")]
pub struct Rejection {
    /// 1-based line number in the source.
    pub line: usize,
    pub section: Section,
    pub reason: RejectReason,
}

/// Everything a data file describes, plus the lines that were dropped.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub graph: LocationGraph,
    pub optimizer: ShipmentOptimizer,
    pub rejected: Vec<Rejection>,
}

/// Parse a data file's contents.
///
/// Bad lines are logged, collected in [`Dataset::rejected`] and skipped;
/// they never abort the load. Routes must come after the locations they
/// connect.
pub fn load_str(input: &str, config: OptimizerConfig) -> Dataset {
    let mut graph = LocationGraph::new();
    let mut optimizer = ShipmentOptimizer::new(config);
    let mut rejected = Vec::new();

    let mut current = Section::Unknown;
    let mut expect_header = false;

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(next) = Section::from_marker(line) {
            current = next;
            expect_header = true;
            continue;
        }

        if expect_header {
            expect_header = false;
            continue;
        }

        let outcome: Result<(), RejectReason> = match current {
            Section::Locations => section::parse_location(line)
                .map(|location| {
                    graph.add_location(location);
                })
                .map_err(RejectReason::from),
            Section::Routes => section::parse_route(line)
                .map_err(RejectReason::from)
                .and_then(|route| {
                    graph
                        .add_route(&route.from, &route.to, route.distance)
                        .map_err(RejectReason::from)
                }),
            Section::Goods => section::parse_good(line)
                .map(|good| {
                    optimizer.add_good(good);
                })
                .map_err(RejectReason::from),
            Section::Demands => section::parse_demand(line)
                .map(|demand| {
                    optimizer.set_demand(demand);
                })
                .map_err(RejectReason::from),
            Section::Unknown => Ok(()),
        };

        if let Err(reason) = outcome {
            let rejection = Rejection {
                line: idx + 1,
                section: current,
                reason,
            };
            warn!(line = rejection.line, section = ?current, error = %rejection.reason, "skipping record");
            rejected.push(rejection);
        }
    }

    info!(
        locations = graph.len(),
        routes = graph.route_count(),
        goods = optimizer.goods().count(),
        demands = optimizer.demand_count(),
        rejected = rejected.len(),
        "dataset loaded"
    );

    Dataset {
        graph,
        optimizer,
        rejected,
    }
}

/// Read and parse a data file.
pub fn load_file(path: impl AsRef<Path>, config: OptimizerConfig) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(load_str(&input, config))
}
