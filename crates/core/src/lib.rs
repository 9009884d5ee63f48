//! `autoflex-core` — shared building blocks for the catalog and planning crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, required_text};
pub use id::{BomLineId, ProductId, RawMaterialId};
