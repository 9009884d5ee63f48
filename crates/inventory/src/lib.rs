//! Inventory domain module: raw materials and their stock on hand.
//!
//! This crate contains business rules for raw materials, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod raw_material;

pub use raw_material::{RawMaterial, RawMaterialDraft};
