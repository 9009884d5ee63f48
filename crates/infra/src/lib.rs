//! Infrastructure layer: catalog storage adapters.

pub mod catalog;

pub use catalog::{BomEntry, CatalogStore, CatalogStoreError, InMemoryCatalogStore, StoreResult};
