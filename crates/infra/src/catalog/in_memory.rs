use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use autoflex_core::{BomLineId, DomainError, ProductId, RawMaterialId};
use autoflex_inventory::{RawMaterial, RawMaterialDraft};
use autoflex_planning::{CatalogRecords, CatalogSource, PlanningError, PlanningResult};
use autoflex_products::{BomLine, BomLineSpec, Product, ProductDraft, validate_specs};

use super::r#trait::{BomEntry, CatalogStore, CatalogStoreError, StoreResult};

#[derive(Debug, Default)]
struct CatalogState {
    revision: u64,
    products: BTreeMap<ProductId, Product>,
    raw_materials: BTreeMap<RawMaterialId, RawMaterial>,
    bom_lines: Vec<BomLine>,
}

impl CatalogState {
    fn bump(&mut self) {
        self.revision += 1;
        tracing::debug!(revision = self.revision, "catalog revision bumped");
    }

    fn product_code_taken(&self, code: &str, except: Option<ProductId>) -> bool {
        self.products
            .values()
            .any(|p| p.code() == code && Some(p.id_typed()) != except)
    }

    fn material_code_taken(&self, code: &str, except: Option<RawMaterialId>) -> bool {
        self.raw_materials
            .values()
            .any(|m| m.code() == code && Some(m.id_typed()) != except)
    }

    fn entries_for(&self, product_id: ProductId) -> Vec<BomEntry> {
        self.bom_lines
            .iter()
            .filter(|line| line.product_id == product_id)
            .filter_map(|line| {
                let material = self.raw_materials.get(&line.raw_material_id)?;
                Some(BomEntry {
                    line: line.clone(),
                    raw_material_code: material.code().to_string(),
                    raw_material_name: material.name().to_string(),
                })
            })
            .collect()
    }
}

/// In-memory catalog store for tests/dev.
///
/// One lock guards the whole catalog, so a planning read always sees products,
/// stock and BOM lines from the same revision.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<CatalogState>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, CatalogState>> {
        self.inner
            .read()
            .map_err(|_| CatalogStoreError::Unavailable("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, CatalogState>> {
        self.inner
            .write()
            .map_err(|_| CatalogStoreError::Unavailable("lock poisoned".to_string()))
    }
}

fn duplicate_code(kind: &str) -> CatalogStoreError {
    DomainError::conflict(format!("{kind} code already exists")).into()
}

impl CatalogSource for InMemoryCatalogStore {
    fn read_catalog(&self) -> PlanningResult<CatalogRecords> {
        let state = self
            .read()
            .map_err(|e| PlanningError::source_failed(e.to_string()))?;

        Ok(CatalogRecords {
            revision: state.revision,
            products: state.products.values().cloned().collect(),
            raw_materials: state.raw_materials.values().cloned().collect(),
            bom_lines: state.bom_lines.clone(),
        })
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn revision(&self) -> StoreResult<u64> {
        Ok(self.read()?.revision)
    }

    fn create_raw_material(&self, draft: RawMaterialDraft) -> StoreResult<RawMaterial> {
        let material = RawMaterial::new(RawMaterialId::new(), draft)?;

        let mut state = self.write()?;
        if state.material_code_taken(material.code(), None) {
            return Err(duplicate_code("raw material"));
        }
        state.raw_materials.insert(material.id_typed(), material.clone());
        state.bump();
        Ok(material)
    }

    fn list_raw_materials(&self) -> StoreResult<Vec<RawMaterial>> {
        let state = self.read()?;
        let mut all: Vec<RawMaterial> = state.raw_materials.values().cloned().collect();
        all.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(all)
    }

    fn get_raw_material(&self, id: RawMaterialId) -> StoreResult<RawMaterial> {
        self.read()?
            .raw_materials
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("raw material").into())
    }

    fn update_raw_material(&self, id: RawMaterialId, draft: RawMaterialDraft) -> StoreResult<RawMaterial> {
        let mut state = self.write()?;
        let mut material = state
            .raw_materials
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("raw material"))?;

        material.update(draft)?;
        if state.material_code_taken(material.code(), Some(id)) {
            return Err(duplicate_code("raw material"));
        }
        state.raw_materials.insert(id, material.clone());
        state.bump();
        Ok(material)
    }

    fn delete_raw_material(&self, id: RawMaterialId) -> StoreResult<()> {
        let mut state = self.write()?;
        if !state.raw_materials.contains_key(&id) {
            return Err(DomainError::not_found("raw material").into());
        }

        let uses = state
            .bom_lines
            .iter()
            .filter(|line| line.raw_material_id == id)
            .count();
        if uses > 0 {
            return Err(DomainError::conflict(format!(
                "raw material is used by {uses} BOM line(s)"
            ))
            .into());
        }

        state.raw_materials.remove(&id);
        state.bump();
        Ok(())
    }

    fn create_product(&self, draft: ProductDraft) -> StoreResult<Product> {
        let product = Product::new(ProductId::new(), draft)?;

        let mut state = self.write()?;
        if state.product_code_taken(product.code(), None) {
            return Err(duplicate_code("product"));
        }
        state.products.insert(product.id_typed(), product.clone());
        state.bump();
        Ok(product)
    }

    fn list_products(&self) -> StoreResult<Vec<Product>> {
        let state = self.read()?;
        let mut all: Vec<Product> = state.products.values().cloned().collect();
        all.sort_by(|a, b| a.code().cmp(b.code()));
        Ok(all)
    }

    fn get_product(&self, id: ProductId) -> StoreResult<Product> {
        self.read()?
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("product").into())
    }

    fn update_product(&self, id: ProductId, draft: ProductDraft) -> StoreResult<Product> {
        let mut state = self.write()?;
        let mut product = state
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("product"))?;

        product.update(draft)?;
        if state.product_code_taken(product.code(), Some(id)) {
            return Err(duplicate_code("product"));
        }
        state.products.insert(id, product.clone());
        state.bump();
        Ok(product)
    }

    fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let mut state = self.write()?;
        if state.products.remove(&id).is_none() {
            return Err(DomainError::not_found("product").into());
        }
        state.bom_lines.retain(|line| line.product_id != id);
        state.bump();
        Ok(())
    }

    fn list_materials(&self, product_id: ProductId) -> StoreResult<Vec<BomEntry>> {
        let state = self.read()?;
        if !state.products.contains_key(&product_id) {
            return Err(DomainError::not_found("product").into());
        }
        Ok(state.entries_for(product_id))
    }

    fn replace_materials(&self, product_id: ProductId, specs: Vec<BomLineSpec>) -> StoreResult<Vec<BomEntry>> {
        validate_specs(&specs)?;

        let mut state = self.write()?;
        if !state.products.contains_key(&product_id) {
            return Err(DomainError::not_found("product").into());
        }
        if let Some(missing) = specs
            .iter()
            .find(|s| !state.raw_materials.contains_key(&s.raw_material_id))
        {
            return Err(DomainError::not_found(format!("raw material {}", missing.raw_material_id)).into());
        }

        let mut lines = Vec::with_capacity(specs.len());
        for spec in specs {
            lines.push(BomLine::new(BomLineId::new(), product_id, spec)?);
        }

        state.bom_lines.retain(|line| line.product_id != product_id);
        state.bom_lines.extend(lines);
        state.bump();
        Ok(state.entries_for(product_id))
    }
}
