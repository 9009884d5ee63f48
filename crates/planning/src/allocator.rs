//! Allocation of shared raw-material stock across competing products.
//!
//! Exact optimisation is a multi-dimensional knapsack problem. The shipped
//! strategy is a single greedy pass instead: deterministic, linear in the size of
//! the BOM, and easy to explain, at the price of not always reaching the best
//! achievable total value.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoflex_core::{ProductId, RawMaterialId};
use autoflex_products::{BomLine, Product};

use crate::feasibility::{StockLevels, feasible_quantity, units_covered};
use crate::snapshot::Snapshot;

/// Quantity granted to one product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub product_id: ProductId,
    pub quantity: u64,
}

/// Result of an allocation: one grant per product, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    grants: Vec<Grant>,
}

impl Allocation {
    pub fn new(grants: Vec<Grant>) -> Self {
        Self { grants }
    }

    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }

    /// Granted quantity for a product (zero if it was not processed).
    pub fn quantity_of(&self, product_id: &ProductId) -> u64 {
        self.grants
            .iter()
            .find(|g| &g.product_id == product_id)
            .map(|g| g.quantity)
            .unwrap_or(0)
    }
}

/// Strategy deciding how much of each product to produce from a snapshot.
///
/// Implementations must not mutate the snapshot and must be deterministic:
/// the same snapshot always yields the same allocation.
pub trait AllocationStrategy {
    /// Short, stable name used in logs.
    fn name(&self) -> &'static str;

    fn allocate(&self, snapshot: &Snapshot) -> Allocation;
}

/// Per-run mutable copy of raw-material stock.
///
/// Built from a snapshot and dropped at the end of the run; the snapshot and the
/// persisted stock are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingStock {
    levels: BTreeMap<RawMaterialId, Decimal>,
}

impl WorkingStock {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let levels = snapshot
            .raw_materials()
            .map(|m| (m.id_typed(), m.stock_quantity()))
            .collect();
        Self { levels }
    }

    /// Deduct `units` worth of every BOM line.
    ///
    /// Callers must not consume more than [`feasible_quantity`] granted against
    /// this same working stock; levels then stay non-negative.
    pub fn consume(&mut self, bom: &[BomLine], units: u64) {
        if units == 0 {
            return;
        }
        let units = Decimal::from(units);
        for line in bom {
            let level = self.levels.entry(line.raw_material_id).or_insert(Decimal::ZERO);
            let needed = units.saturating_mul(line.required_quantity);
            debug_assert!(
                needed <= *level,
                "raw material {} over-consumed: {} needed, {} left",
                line.raw_material_id,
                needed,
                level
            );
            *level -= needed;
        }
    }
}

impl StockLevels for WorkingStock {
    fn available(&self, raw_material_id: &RawMaterialId) -> Decimal {
        self.levels.get(raw_material_id).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Greedy allocation by unit value.
///
/// Products are processed by descending price, then ascending code, then id.
/// Each one takes everything it can from what higher-priority products left
/// behind, bounded so that the plan's total value stays representable as a
/// `Decimal`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GreedyByValue;

impl GreedyByValue {
    /// Processing order of the greedy pass.
    pub fn priority(a: &Product, b: &Product) -> Ordering {
        b.price()
            .cmp(&a.price())
            .then_with(|| a.code().cmp(b.code()))
            .then_with(|| a.id_typed().cmp(&b.id_typed()))
    }
}

impl AllocationStrategy for GreedyByValue {
    fn name(&self) -> &'static str {
        "greedy_by_value"
    }

    fn allocate(&self, snapshot: &Snapshot) -> Allocation {
        let mut ordered: Vec<&Product> = snapshot.products().collect();
        ordered.sort_by(|a, b| Self::priority(a, b));

        let mut working = WorkingStock::from_snapshot(snapshot);
        let mut grants = Vec::with_capacity(ordered.len());
        let mut committed_value = Decimal::ZERO;

        for product in ordered {
            let bom = snapshot.bom_of(&product.id_typed());
            let feasible = feasible_quantity(bom, &working);
            let quantity = feasible.min(value_ceiling(committed_value, product.price()));
            if quantity < feasible {
                tracing::warn!(
                    product = %product.code(),
                    feasible,
                    quantity,
                    "grant capped to keep the plan value representable"
                );
            }
            working.consume(bom, quantity);
            committed_value = Decimal::from(quantity)
                .checked_mul(product.price())
                .and_then(|value| committed_value.checked_add(value))
                .unwrap_or(Decimal::MAX);

            tracing::trace!(
                product = %product.code(),
                price = %product.price(),
                quantity,
                "greedy grant"
            );

            grants.push(Grant {
                product_id: product.id_typed(),
                quantity,
            });
        }

        Allocation::new(grants)
    }
}

/// Most units of a product at `price` that still fit in the value headroom
/// left after `committed` has been granted.
fn value_ceiling(committed: Decimal, price: Decimal) -> u64 {
    if price <= Decimal::ZERO {
        return u64::MAX;
    }
    let headroom = Decimal::MAX.checked_sub(committed).unwrap_or(Decimal::ZERO);
    units_covered(headroom, price)
}
