//! Suggestion report: the externally visible production plan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoflex_core::ProductId;

use crate::allocator::Allocation;
use crate::error::{PlanningError, PlanningResult};
use crate::snapshot::Snapshot;

/// One product the plan suggests producing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionPlanItem {
    pub product_id: ProductId,
    pub product_code: String,
    pub product_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub suggested_quantity: u64,
    /// `unit_price * suggested_quantity`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
}

/// Production suggestion for one snapshot.
///
/// Items are in allocation priority order; products with a zero quantity are
/// left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionPlan {
    pub items: Vec<ProductionPlanItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value: Decimal,
}

impl ProductionPlan {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Suggested quantity for a product (zero when it is not in the plan).
    pub fn quantity_of(&self, product_id: &ProductId) -> u64 {
        self.items
            .iter()
            .find(|item| &item.product_id == product_id)
            .map(|item| item.suggested_quantity)
            .unwrap_or(0)
    }
}

/// Turn an allocation into the report. No further computation happens here.
///
/// Fails when an item or the plan total does not fit in a `Decimal`; the
/// greedy strategy never grants that much.
pub fn assemble(snapshot: &Snapshot, allocation: &Allocation) -> PlanningResult<ProductionPlan> {
    let mut plan = ProductionPlan::default();

    for grant in allocation.grants().iter().filter(|g| g.quantity > 0) {
        let Some(product) = snapshot.product(&grant.product_id) else {
            tracing::warn!(product_id = %grant.product_id, "grant for product outside snapshot ignored");
            continue;
        };

        let total_value = product
            .price()
            .checked_mul(Decimal::from(grant.quantity))
            .ok_or_else(|| {
                PlanningError::inconsistency(format!(
                    "value of {} units of product {} is out of range",
                    grant.quantity,
                    product.code()
                ))
            })?;
        plan.total_value = plan
            .total_value
            .checked_add(total_value)
            .ok_or_else(|| PlanningError::inconsistency("plan total value is out of range"))?;
        plan.items.push(ProductionPlanItem {
            product_id: grant.product_id,
            product_code: product.code().to_string(),
            product_name: product.name().to_string(),
            unit_price: product.price(),
            suggested_quantity: grant.quantity,
            total_value,
        });
    }

    Ok(plan)
}
