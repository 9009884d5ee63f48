use std::sync::Arc;

use autoflex_infra::{CatalogStore, InMemoryCatalogStore};
use autoflex_planning::{PlanningResult, ProductionPlan, ProductionPlanner};

/// Everything the handlers need, shared behind an `Arc`.
pub struct AppServices {
    pub catalog: Arc<dyn CatalogStore>,
    pub planner: ProductionPlanner,
}

impl AppServices {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Arc<Self> {
        Arc::new(Self {
            catalog,
            planner: ProductionPlanner::new(),
        })
    }

    /// Services backed by a fresh, empty in-memory catalog.
    pub fn in_memory() -> Arc<Self> {
        Self::new(Arc::new(InMemoryCatalogStore::new()))
    }

    /// Compute a production suggestion from a fresh snapshot of the catalog.
    pub fn suggest(&self) -> PlanningResult<ProductionPlan> {
        self.planner.suggest(self.catalog.as_ref())
    }
}
