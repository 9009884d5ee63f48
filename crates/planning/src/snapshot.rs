//! Catalog loading: one consistent, immutable read of products, stock and BOM.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoflex_core::{ProductId, RawMaterialId};
use autoflex_inventory::RawMaterial;
use autoflex_products::{BomLine, Product};

use crate::error::{PlanningError, PlanningResult};
use crate::feasibility::StockLevels;

/// Raw catalog records as read from the store, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecords {
    /// Store revision the records were read at (point-in-time token).
    pub revision: u64,
    pub products: Vec<Product>,
    pub raw_materials: Vec<RawMaterial>,
    pub bom_lines: Vec<BomLine>,
}

/// Read side of the catalog store.
///
/// Implementations must return products, raw materials and BOM lines from a
/// single consistent read: a concurrent write may land before or after the
/// read, never in the middle of it.
pub trait CatalogSource {
    fn read_catalog(&self) -> PlanningResult<CatalogRecords>;
}

impl<S> CatalogSource for Arc<S>
where
    S: CatalogSource + ?Sized,
{
    fn read_catalog(&self) -> PlanningResult<CatalogRecords> {
        (**self).read_catalog()
    }
}

/// A fixed record set is a valid source (tests, offline what-if runs).
impl CatalogSource for CatalogRecords {
    fn read_catalog(&self) -> PlanningResult<CatalogRecords> {
        Ok(self.clone())
    }
}

/// Immutable, validated input of one production suggestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    revision: u64,
    taken_at: DateTime<Utc>,
    products: BTreeMap<ProductId, Product>,
    raw_materials: BTreeMap<RawMaterialId, RawMaterial>,
    bom: BTreeMap<ProductId, Vec<BomLine>>,
}

/// Read the catalog from `source` and validate it into a [`Snapshot`].
pub fn load_snapshot<S>(source: &S) -> PlanningResult<Snapshot>
where
    S: CatalogSource + ?Sized,
{
    let records = source.read_catalog()?;
    Snapshot::new(records, Utc::now())
}

impl Snapshot {
    /// Validate raw records. Any dangling reference or out-of-range quantity
    /// rejects the whole snapshot.
    pub fn new(records: CatalogRecords, taken_at: DateTime<Utc>) -> PlanningResult<Self> {
        let CatalogRecords {
            revision,
            products: product_list,
            raw_materials: material_list,
            bom_lines,
        } = records;

        let mut products = BTreeMap::new();
        for product in product_list {
            if product.price() < Decimal::ZERO {
                return Err(PlanningError::inconsistency(format!(
                    "product {} has negative price {}",
                    product.code(),
                    product.price()
                )));
            }
            let id = product.id_typed();
            if products.insert(id, product).is_some() {
                return Err(PlanningError::inconsistency(format!("duplicate product id {id}")));
            }
        }

        let mut raw_materials = BTreeMap::new();
        for material in material_list {
            if material.stock_quantity() < Decimal::ZERO {
                return Err(PlanningError::inconsistency(format!(
                    "raw material {} has negative stock {}",
                    material.code(),
                    material.stock_quantity()
                )));
            }
            let id = material.id_typed();
            if raw_materials.insert(id, material).is_some() {
                return Err(PlanningError::inconsistency(format!(
                    "duplicate raw material id {id}"
                )));
            }
        }

        let mut bom: BTreeMap<ProductId, Vec<BomLine>> = BTreeMap::new();
        let mut pairs: HashSet<(ProductId, RawMaterialId)> = HashSet::with_capacity(bom_lines.len());
        for line in bom_lines {
            if !products.contains_key(&line.product_id) {
                return Err(PlanningError::inconsistency(format!(
                    "BOM line {} references unknown product {}",
                    line.id, line.product_id
                )));
            }
            if !raw_materials.contains_key(&line.raw_material_id) {
                return Err(PlanningError::inconsistency(format!(
                    "BOM line {} references unknown raw material {}",
                    line.id, line.raw_material_id
                )));
            }
            if line.required_quantity <= Decimal::ZERO {
                return Err(PlanningError::inconsistency(format!(
                    "BOM line {} has non-positive required quantity {}",
                    line.id, line.required_quantity
                )));
            }
            if !pairs.insert((line.product_id, line.raw_material_id)) {
                return Err(PlanningError::inconsistency(format!(
                    "product {} lists raw material {} more than once",
                    line.product_id, line.raw_material_id
                )));
            }
            bom.entry(line.product_id).or_default().push(line);
        }

        Ok(Self {
            revision,
            taken_at,
            products,
            raw_materials,
            bom,
        })
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    /// No products or no raw materials: nothing can be produced.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() || self.raw_materials.is_empty()
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn raw_materials(&self) -> impl Iterator<Item = &RawMaterial> {
        self.raw_materials.values()
    }

    pub fn raw_material(&self, id: &RawMaterialId) -> Option<&RawMaterial> {
        self.raw_materials.get(id)
    }

    /// BOM lines of a product; empty when the product has none.
    pub fn bom_of(&self, product_id: &ProductId) -> &[BomLine] {
        self.bom.get(product_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl StockLevels for Snapshot {
    fn available(&self, raw_material_id: &RawMaterialId) -> Decimal {
        self.raw_materials
            .get(raw_material_id)
            .map(RawMaterial::stock_quantity)
            .unwrap_or(Decimal::ZERO)
    }
}
