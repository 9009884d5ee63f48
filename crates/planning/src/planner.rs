//! Suggestion pipeline: load → allocate → assemble.

use crate::allocator::{AllocationStrategy, GreedyByValue};
use crate::error::PlanningResult;
use crate::plan::{ProductionPlan, assemble};
use crate::snapshot::{CatalogSource, Snapshot, load_snapshot};

/// Production suggestion service.
///
/// Holds no mutable state: every call owns its snapshot and working stock, so
/// concurrent calls never interfere.
#[derive(Debug, Clone, Default)]
pub struct ProductionPlanner<S = GreedyByValue> {
    strategy: S,
}

impl ProductionPlanner<GreedyByValue> {
    pub fn new() -> Self {
        Self::with_strategy(GreedyByValue)
    }
}

impl<S: AllocationStrategy> ProductionPlanner<S> {
    pub fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Compute a plan for an already-loaded snapshot.
    pub fn plan(&self, snapshot: &Snapshot) -> PlanningResult<ProductionPlan> {
        if snapshot.is_empty() {
            return Ok(ProductionPlan::default());
        }
        let allocation = self.strategy.allocate(snapshot);
        assemble(snapshot, &allocation)
    }

    /// Take a snapshot of `source` and compute its plan.
    pub fn suggest<C>(&self, source: &C) -> PlanningResult<ProductionPlan>
    where
        C: CatalogSource + ?Sized,
    {
        let result = load_snapshot(source).and_then(|snapshot| {
            let plan = self.plan(&snapshot)?;
            Ok((snapshot, plan))
        });
        let (snapshot, plan) = match result {
            Ok(done) => done,
            Err(e) => {
                tracing::error!(error = %e, "production suggestion aborted");
                return Err(e);
            }
        };

        tracing::info!(
            strategy = self.strategy.name(),
            revision = snapshot.revision(),
            products = snapshot.product_count(),
            items = plan.items.len(),
            total_value = %plan.total_value,
            "production plan computed"
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanningError;
    use crate::snapshot::CatalogRecords;
    use crate::testing::{CatalogBuilder, arb_catalog};
    use autoflex_core::{BomLineId, ProductId};
    use autoflex_products::BomLine;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    struct FailingSource;

    impl CatalogSource for FailingSource {
        fn read_catalog(&self) -> PlanningResult<CatalogRecords> {
            Err(PlanningError::source_failed("connection refused"))
        }
    }

    #[test]
    fn single_product_uses_all_stock() {
        let mut catalog = CatalogBuilder::new();
        let steel = catalog.material("RM010", dec!(200.000));
        let table = catalog.product("P100", dec!(350.00));
        catalog.requires(table, steel, dec!(10.000));

        let plan = ProductionPlanner::new().suggest(&catalog.records()).unwrap();
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].product_code, "P100");
        assert_eq!(plan.items[0].suggested_quantity, 20);
        assert_eq!(plan.items[0].total_value, dec!(7000.00));
        assert_eq!(plan.total_value, dec!(7000.00));
    }

    #[test]
    fn higher_price_products_win_shared_stock() {
        let mut catalog = CatalogBuilder::new();
        let shared = catalog.material("RM010", dec!(200.000));
        let regular = catalog.product("P100", dec!(350.00));
        let premium = catalog.product("P200", dec!(500.00));
        catalog.requires(premium, shared, dec!(20.000));
        catalog.requires(regular, shared, dec!(10.000));

        let plan = ProductionPlanner::new().suggest(&catalog.records()).unwrap();
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].product_code, "P200");
        assert_eq!(plan.items[0].suggested_quantity, 10);
        assert_eq!(plan.total_value, dec!(5000.00));
        assert_eq!(plan.quantity_of(&regular), 0);
    }

    #[test]
    fn scenario_a_two_products_one_material() {
        let mut catalog = CatalogBuilder::new();
        let m = catalog.material("M", dec!(10));
        let a = catalog.product("A", dec!(100));
        let b = catalog.product("B", dec!(50));
        catalog.requires(a, m, dec!(5));
        catalog.requires(b, m, dec!(5));

        let plan = ProductionPlanner::new().suggest(&catalog.records()).unwrap();
        assert_eq!(plan.quantity_of(&a), 2);
        assert_eq!(plan.quantity_of(&b), 0);
        assert_eq!(plan.total_value, dec!(200));
    }

    #[test]
    fn scenario_b_product_without_bom_is_never_suggested() {
        let mut catalog = CatalogBuilder::new();
        catalog.material("M", dec!(10));
        let c = catalog.product("C", dec!(99999));

        let plan = ProductionPlanner::new().suggest(&catalog.records()).unwrap();
        assert_eq!(plan.quantity_of(&c), 0);
        assert!(plan.is_empty());
    }

    #[test]
    fn scenario_c_tie_goes_to_lower_code() {
        let mut catalog = CatalogBuilder::new();
        let m = catalog.material("M", dec!(2.5));
        let second = catalog.product("TIE-B", dec!(75));
        let first = catalog.product("TIE-A", dec!(75.00));
        catalog.requires(second, m, dec!(2.5));
        catalog.requires(first, m, dec!(2.5));

        let plan = ProductionPlanner::new().suggest(&catalog.records()).unwrap();
        assert_eq!(plan.items.len(), 1);
        assert_eq!(plan.items[0].product_id, first);
        assert_eq!(plan.items[0].suggested_quantity, 1);
    }

    #[test]
    fn scenario_d_empty_catalog() {
        let plan = ProductionPlanner::new().suggest(&CatalogRecords::default()).unwrap();
        assert!(plan.items.is_empty());
        assert_eq!(plan.total_value, Decimal::ZERO);
    }

    #[test]
    fn limiting_material_caps_the_product() {
        let mut catalog = CatalogBuilder::new();
        let rm1 = catalog.material("RM1", dec!(100.000));
        let rm2 = catalog.material("RM2", dec!(15.000));
        let product = catalog.product("P300", dec!(100.00));
        catalog.requires(product, rm1, dec!(10.000));
        catalog.requires(product, rm2, dec!(1.000));

        let plan = ProductionPlanner::new().suggest(&catalog.records()).unwrap();
        assert_eq!(plan.quantity_of(&product), 10);
        assert_eq!(plan.total_value, dec!(1000.00));
    }

    #[test]
    fn insufficient_stock_yields_empty_plan() {
        let mut catalog = CatalogBuilder::new();
        let rare = catalog.material("RM500", dec!(5.000));
        let heavy = catalog.product("P500", dec!(100.00));
        catalog.requires(heavy, rare, dec!(10.000));

        let plan = ProductionPlanner::new().suggest(&catalog.records()).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.total_value, Decimal::ZERO);
    }

    #[test]
    fn independent_materials_serve_every_product() {
        let mut catalog = CatalogBuilder::new();
        let rm_a = catalog.material("RM-A", dec!(50.000));
        let rm_b = catalog.material("RM-B", dec!(21.000));
        let a = catalog.product("P-A", dec!(100.00));
        let b = catalog.product("P-B", dec!(80.00));
        catalog.requires(a, rm_a, dec!(10.000));
        catalog.requires(b, rm_b, dec!(7.000));

        let plan = ProductionPlanner::new().suggest(&catalog.records()).unwrap();
        assert_eq!(plan.items.len(), 2);
        assert_eq!(plan.quantity_of(&a), 5);
        assert_eq!(plan.quantity_of(&b), 3);
        assert_eq!(plan.total_value, dec!(740.00));
    }

    #[test]
    fn inconsistent_catalog_aborts_the_run() {
        let mut catalog = CatalogBuilder::new();
        let m = catalog.material("M", dec!(10));
        let mut records = catalog.records();
        records.bom_lines.push(BomLine {
            id: BomLineId::new(),
            product_id: ProductId::new(),
            raw_material_id: m,
            required_quantity: dec!(1),
        });

        let err = ProductionPlanner::new().suggest(&records).unwrap_err();
        assert!(matches!(err, PlanningError::DataInconsistency(_)));
    }

    #[test]
    fn source_failure_is_passed_through() {
        let err = ProductionPlanner::new().suggest(&FailingSource).unwrap_err();
        assert_eq!(err, PlanningError::source_failed("connection refused"));
    }

    #[test]
    fn huge_quantities_are_capped_to_a_representable_total() {
        let mut catalog = CatalogBuilder::new();
        let m = catalog.material("M", dec!(100000000000000000000));
        let n = catalog.material("N", dec!(100000000000000000000));
        let premium = catalog.product("P", dec!(10000000000));
        let cheap = catalog.product("Q", dec!(1));
        catalog.requires(premium, m, dec!(0.000000001));
        catalog.requires(cheap, n, dec!(1));

        let plan = ProductionPlanner::new().suggest(&catalog.records()).unwrap();

        // floor(Decimal::MAX / 1e10) units of P, then Q fills the remaining headroom.
        assert_eq!(plan.quantity_of(&premium), 7_922_816_251_426_433_759);
        assert_eq!(plan.items[0].total_value, dec!(79228162514264337590000000000));
        assert_eq!(plan.quantity_of(&cheap), 3_543_950_335);
        assert_eq!(plan.total_value, Decimal::MAX);
        assert!(serde_json::to_vec(&plan).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: two runs on the same snapshot give byte-identical reports.
        #[test]
        fn plans_are_byte_identical(catalog in arb_catalog()) {
            let snapshot = catalog.snapshot();
            let planner = ProductionPlanner::new();

            let first = serde_json::to_vec(&planner.plan(&snapshot).unwrap()).unwrap();
            let second = serde_json::to_vec(&planner.plan(&snapshot).unwrap()).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: every item is positive and the total is the sum of item totals.
        #[test]
        fn totals_add_up(catalog in arb_catalog()) {
            let plan = ProductionPlanner::new().plan(&catalog.snapshot()).unwrap();

            let mut sum = Decimal::ZERO;
            for item in &plan.items {
                prop_assert!(item.suggested_quantity > 0);
                prop_assert_eq!(item.total_value, item.unit_price * Decimal::from(item.suggested_quantity));
                sum += item.total_value;
            }
            prop_assert_eq!(plan.total_value, sum);
        }
    }
}
