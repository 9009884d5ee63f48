//! Bill of materials: how much of each raw material one unit of a product consumes.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoflex_core::{BomLineId, DomainError, DomainResult, ProductId, RawMaterialId};

/// One requirement of a product's bill of materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    pub id: BomLineId,
    pub product_id: ProductId,
    pub raw_material_id: RawMaterialId,
    /// Quantity of the raw material consumed per produced unit. Always positive.
    pub required_quantity: Decimal,
}

/// Requested BOM line, as supplied when a product's BOM is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLineSpec {
    pub raw_material_id: RawMaterialId,
    pub required_quantity: Decimal,
}

impl BomLine {
    pub fn new(id: BomLineId, product_id: ProductId, spec: BomLineSpec) -> DomainResult<Self> {
        ensure_positive(spec.raw_material_id, spec.required_quantity)?;
        Ok(Self {
            id,
            product_id,
            raw_material_id: spec.raw_material_id,
            required_quantity: spec.required_quantity,
        })
    }
}

/// Validate a full replacement BOM: positive quantities, each material at most once.
pub fn validate_specs(specs: &[BomLineSpec]) -> DomainResult<()> {
    let mut seen: HashSet<RawMaterialId> = HashSet::with_capacity(specs.len());
    for spec in specs {
        ensure_positive(spec.raw_material_id, spec.required_quantity)?;
        if !seen.insert(spec.raw_material_id) {
            return Err(DomainError::validation(format!(
                "raw material {} listed more than once",
                spec.raw_material_id
            )));
        }
    }
    Ok(())
}

fn ensure_positive(raw_material_id: RawMaterialId, quantity: Decimal) -> DomainResult<()> {
    if quantity <= Decimal::ZERO {
        return Err(DomainError::validation(format!(
            "required quantity for raw material {raw_material_id} must be positive"
        )));
    }
    Ok(())
}
