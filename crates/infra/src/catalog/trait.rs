use serde::{Deserialize, Serialize};
use thiserror::Error;

use autoflex_core::{DomainError, ProductId, RawMaterialId};
use autoflex_inventory::{RawMaterial, RawMaterialDraft};
use autoflex_planning::CatalogSource;
use autoflex_products::{BomLine, BomLineSpec, Product, ProductDraft};

pub type StoreResult<T> = Result<T, CatalogStoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogStoreError {
    /// Business rule rejection (validation, missing record, conflict).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The store itself cannot serve requests.
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

/// A BOM line joined with the raw material it consumes (for display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomEntry {
    pub line: BomLine,
    pub raw_material_code: String,
    pub raw_material_name: String,
}

/// Catalog persistence.
///
/// Every successful write bumps the store revision. The [`CatalogSource`] read
/// must observe either all or none of a write.
pub trait CatalogStore: CatalogSource + Send + Sync {
    fn revision(&self) -> StoreResult<u64>;

    fn create_raw_material(&self, draft: RawMaterialDraft) -> StoreResult<RawMaterial>;
    fn list_raw_materials(&self) -> StoreResult<Vec<RawMaterial>>;
    fn get_raw_material(&self, id: RawMaterialId) -> StoreResult<RawMaterial>;
    fn update_raw_material(&self, id: RawMaterialId, draft: RawMaterialDraft) -> StoreResult<RawMaterial>;
    /// Fails with a conflict while any BOM line still uses the material.
    fn delete_raw_material(&self, id: RawMaterialId) -> StoreResult<()>;

    fn create_product(&self, draft: ProductDraft) -> StoreResult<Product>;
    fn list_products(&self) -> StoreResult<Vec<Product>>;
    fn get_product(&self, id: ProductId) -> StoreResult<Product>;
    fn update_product(&self, id: ProductId, draft: ProductDraft) -> StoreResult<Product>;
    /// Also drops the product's BOM lines.
    fn delete_product(&self, id: ProductId) -> StoreResult<()>;

    fn list_materials(&self, product_id: ProductId) -> StoreResult<Vec<BomEntry>>;
    /// Full replace: old lines are dropped, the new ones inserted, atomically.
    fn replace_materials(&self, product_id: ProductId, specs: Vec<BomLineSpec>) -> StoreResult<Vec<BomEntry>>;
}
