use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use autoflex_core::{BomLineId, DomainError, DomainResult, ProductId, RawMaterialId};
use autoflex_infra::BomEntry;
use autoflex_inventory::{RawMaterial, RawMaterialDraft};
use autoflex_products::{BomLineSpec, Product, ProductDraft};

// -------------------------
// Request DTOs
// -------------------------
//
// Fields are optional at the serde level so that a missing field is reported
// as a validation error naming it, not as a generic body rejection. Decimals
// accept JSON numbers or strings.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub stock_quantity: Option<Decimal>,
}

impl RawMaterialRequest {
    pub fn into_draft(self) -> DomainResult<RawMaterialDraft> {
        Ok(RawMaterialDraft {
            code: required("code", self.code)?,
            name: required("name", self.name)?,
            stock_quantity: required("stockQuantity", self.stock_quantity)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub code: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

impl ProductRequest {
    pub fn into_draft(self) -> DomainResult<ProductDraft> {
        Ok(ProductDraft {
            code: required("code", self.code)?,
            name: required("name", self.name)?,
            price: required("price", self.price)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMaterialItemRequest {
    pub raw_material_id: Option<RawMaterialId>,
    pub required_quantity: Option<Decimal>,
}

impl ProductMaterialItemRequest {
    pub fn into_spec(self) -> DomainResult<BomLineSpec> {
        Ok(BomLineSpec {
            raw_material_id: required("rawMaterialId", self.raw_material_id)?,
            required_quantity: required("requiredQuantity", self.required_quantity)?,
        })
    }
}

fn required<T>(field: &str, value: Option<T>) -> DomainResult<T> {
    value.ok_or_else(|| DomainError::validation(format!("{field} is required")))
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMaterialResponse {
    pub id: RawMaterialId,
    pub code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub stock_quantity: Decimal,
}

impl From<&RawMaterial> for RawMaterialResponse {
    fn from(m: &RawMaterial) -> Self {
        Self {
            id: m.id_typed(),
            code: m.code().to_string(),
            name: m.name().to_string(),
            stock_quantity: m.stock_quantity(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub code: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<&Product> for ProductResponse {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id_typed(),
            code: p.code().to_string(),
            name: p.name().to_string(),
            price: p.price(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMaterialItemResponse {
    pub id: BomLineId,
    pub raw_material_id: RawMaterialId,
    pub raw_material_code: String,
    pub raw_material_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub required_quantity: Decimal,
}

impl From<&BomEntry> for ProductMaterialItemResponse {
    fn from(e: &BomEntry) -> Self {
        Self {
            id: e.line.id,
            raw_material_id: e.line.raw_material_id,
            raw_material_code: e.raw_material_code.clone(),
            raw_material_name: e.raw_material_name.clone(),
            required_quantity: e.line.required_quantity,
        }
    }
}

pub fn raw_materials_to_json(materials: &[RawMaterial]) -> Vec<RawMaterialResponse> {
    materials.iter().map(RawMaterialResponse::from).collect()
}

pub fn products_to_json(products: &[Product]) -> Vec<ProductResponse> {
    products.iter().map(ProductResponse::from).collect()
}

pub fn bom_entries_to_json(entries: &[BomEntry]) -> Vec<ProductMaterialItemResponse> {
    entries.iter().map(ProductMaterialItemResponse::from).collect()
}
