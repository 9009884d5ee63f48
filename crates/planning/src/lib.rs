//! `autoflex-planning` — production suggestion engine.
//!
//! Given a consistent snapshot of raw-material stock and every product's bill of
//! materials, decide how many units of each product to produce.
//!
//! Pipeline (single-threaded, synchronous, one snapshot per run):
//! - [`snapshot`]: load and validate the catalog into an immutable [`Snapshot`]
//! - [`feasibility`]: per-product ceiling, ignoring competition for materials
//! - [`allocator`]: greedy allocation over a per-run working copy of stock
//! - [`plan`]: the externally visible [`ProductionPlan`]
//!
//! The greedy allocator favours the highest-priced products first. It is fast and
//! deterministic but it is an approximation: it does not guarantee the maximum
//! achievable total value.

pub mod allocator;
pub mod error;
pub mod feasibility;
pub mod plan;
pub mod planner;
pub mod snapshot;

pub use allocator::{Allocation, AllocationStrategy, Grant, GreedyByValue, WorkingStock};
pub use error::{PlanningError, PlanningResult};
pub use feasibility::{feasible_quantity, units_covered};
pub use plan::{ProductionPlan, ProductionPlanItem, assemble};
pub use planner::ProductionPlanner;
pub use snapshot::{CatalogRecords, CatalogSource, Snapshot, load_snapshot};

#[cfg(test)]
mod testing;
