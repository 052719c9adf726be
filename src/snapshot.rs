//! Shared, swappable role graph snapshot.
//!
//! Readers clone the current `Arc` and evaluate against it for as long as
//! they like; a swap only affects later `load` calls. Edges are never edited
//! in place.

use std::sync::{Arc, RwLock};

use tracing::info;

use crate::error::Result;
use crate::graph::RoleGraph;
use crate::roles::RoleCatalog;

#[derive(Debug, Default)]
pub struct GraphHandle {
    current: RwLock<Arc<RoleGraph>>,
}

impl GraphHandle {
    pub fn new(graph: RoleGraph) -> Self {
        GraphHandle { current: RwLock::new(Arc::new(graph)) }
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<RoleGraph> {
        // A poisoned lock still holds a complete Arc; the swap is a single assignment.
        let guard = self.current.read().unwrap_or_else(|p| p.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the snapshot, returning the previous one.
    pub fn store(&self, next: Arc<RoleGraph>) -> Arc<RoleGraph> {
        let (roles, edges) = (next.len(), next.edge_count());
        let mut guard = self.current.write().unwrap_or_else(|p| p.into_inner());
        let prev = std::mem::replace(&mut *guard, next);
        info!(roles, edges, "role graph swapped");
        prev
    }

    /// Build a graph from `catalog` and swap it in. On a configuration error
    /// the current snapshot stays in place.
    pub fn rebuild(&self, catalog: RoleCatalog) -> Result<Arc<RoleGraph>> {
        let graph = Arc::new(RoleGraph::from_catalog(catalog)?);
        self.store(Arc::clone(&graph));
        Ok(graph)
    }
}
