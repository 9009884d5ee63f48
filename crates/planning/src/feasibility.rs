//! Per-product production ceiling against a given set of stock levels.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use autoflex_core::RawMaterialId;
use autoflex_products::BomLine;

/// Anything that can answer "how much of this material is on hand".
pub trait StockLevels {
    /// Available quantity; unknown materials have none.
    fn available(&self, raw_material_id: &RawMaterialId) -> Decimal;
}

/// Whole units coverable by `available` when each unit needs `required`.
///
/// `floor(available / required)`, clamped to zero. The quotient is rounded by
/// `Decimal` at 28 significant digits, so the candidate is multiplied back and
/// lowered by one unit if rounding overshot. Quotients above `u64::MAX` saturate.
pub fn units_covered(available: Decimal, required: Decimal) -> u64 {
    if required <= Decimal::ZERO || available <= Decimal::ZERO {
        return 0;
    }

    let Some(quotient) = available.checked_div(required) else {
        return u64::MAX;
    };
    let mut units = quotient.floor().to_u64().unwrap_or(u64::MAX);

    if units > 0 {
        match Decimal::from(units).checked_mul(required) {
            Some(needed) if needed <= available => {}
            _ => units -= 1,
        }
    }
    units
}

/// Maximum units of a product producible from `stock`, considering only its own BOM.
///
/// A product without BOM lines is not producible.
pub fn feasible_quantity<S>(bom: &[BomLine], stock: &S) -> u64
where
    S: StockLevels + ?Sized,
{
    bom.iter()
        .map(|line| units_covered(stock.available(&line.raw_material_id), line.required_quantity))
        .min()
        .unwrap_or(0)
}
