//! Test fixtures: a terse catalog builder and a proptest catalog strategy.

use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;

use autoflex_core::{BomLineId, ProductId, RawMaterialId};
use autoflex_inventory::{RawMaterial, RawMaterialDraft};
use autoflex_products::{BomLine, Product, ProductDraft};

use crate::snapshot::{CatalogRecords, Snapshot};

#[derive(Debug, Clone, Default)]
pub(crate) struct CatalogBuilder {
    records: CatalogRecords,
}

impl CatalogBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn material(&mut self, code: &str, stock: Decimal) -> RawMaterialId {
        let id = RawMaterialId::new();
        let material = RawMaterial::new(
            id,
            RawMaterialDraft {
                code: code.to_string(),
                name: format!("Material {code}"),
                stock_quantity: stock,
            },
        )
        .unwrap();
        self.records.raw_materials.push(material);
        id
    }

    pub(crate) fn product(&mut self, code: &str, price: Decimal) -> ProductId {
        let id = ProductId::new();
        let product = Product::new(
            id,
            ProductDraft {
                code: code.to_string(),
                name: format!("Product {code}"),
                price,
            },
        )
        .unwrap();
        self.records.products.push(product);
        id
    }

    /// Appends a BOM line without validation, so broken catalogs can be built too.
    pub(crate) fn requires(
        &mut self,
        product_id: ProductId,
        raw_material_id: RawMaterialId,
        quantity: Decimal,
    ) -> &mut Self {
        self.records.bom_lines.push(BomLine {
            id: BomLineId::new(),
            product_id,
            raw_material_id,
            required_quantity: quantity,
        });
        self
    }

    pub(crate) fn records(&self) -> CatalogRecords {
        self.records.clone()
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.records(), Utc::now()).expect("fixture catalog must be consistent")
    }
}

/// Small random catalogs: 1-3 materials, up to 6 products with colliding codes
/// and prices, each requiring a random subset of the materials.
pub(crate) fn arb_catalog() -> impl Strategy<Value = CatalogBuilder> {
    (
        prop::collection::vec(0i64..100_000, 1..4),
        prop::collection::vec(
            (
                0u8..4,
                1i64..5_000,
                prop::collection::vec(prop::option::of(1i64..20_000), 3),
            ),
            0..7,
        ),
    )
        .prop_map(|(stocks, products)| {
            let mut catalog = CatalogBuilder::new();
            let materials: Vec<RawMaterialId> = stocks
                .iter()
                .enumerate()
                .map(|(i, milli)| catalog.material(&format!("RM{i}"), Decimal::new(*milli, 3)))
                .collect();

            for (code, cents, requirements) in products {
                let product = catalog.product(&format!("P{code}"), Decimal::new(cents * 100, 2));
                for (material, requirement) in materials.iter().zip(requirements) {
                    if let Some(milli) = requirement {
                        catalog.requires(product, *material, Decimal::new(milli, 3));
                    }
                }
            }
            catalog
        })
}
