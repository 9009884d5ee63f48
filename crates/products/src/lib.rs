//! Products domain module: finished goods and their bills of materials.
//!
//! This crate contains business rules for the product catalog, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod bom;
pub mod product;

pub use bom::{BomLine, BomLineSpec, validate_specs};
pub use product::{Product, ProductDraft};
