//! Catalog store boundary: products, raw materials and bills of materials.
//!
//! The production planner only needs the read side ([`CatalogSource`]); the
//! CRUD side is what the HTTP API drives.
//!
//! [`CatalogSource`]: autoflex_planning::CatalogSource

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryCatalogStore;
pub use r#trait::{BomEntry, CatalogStore, CatalogStoreError, StoreResult};
