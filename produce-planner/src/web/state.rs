//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::graph::LocationGraph;
use crate::ingest::Dataset;
use crate::optimizer::ShipmentOptimizer;

/// The graph and catalog one optimization runs against.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub graph: LocationGraph,
    pub optimizer: ShipmentOptimizer,
}

impl From<Dataset> for Snapshot {
    fn from(data: Dataset) -> Self {
        Self {
            graph: data.graph,
            optimizer: data.optimizer,
        }
    }
}

/// Shared application state.
///
/// Readers clone the current `Arc<Snapshot>` and release the lock before
/// optimizing. Writers copy-on-write through `Arc::make_mut`, so a running
/// optimization never observes a half-applied change.
#[derive(Clone)]
pub struct AppState {
    /// Current graph and catalog
    pub snapshot: Arc<RwLock<Arc<Snapshot>>>,

    /// Server limits
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(snapshot: Snapshot, config: ServerConfig) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Arc::new(snapshot))),
            config: Arc::new(config),
        }
    }

    /// The snapshot as of now.
    pub async fn current(&self) -> Arc<Snapshot> {
        self.snapshot.read().await.clone()
    }
}
