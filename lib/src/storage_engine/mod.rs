// lib/src/storage_engine/mod.rs

pub mod catalog_storage;
pub mod inmemory_storage;
pub mod profile_storage;
pub mod seed;
pub mod storage_engine;

pub use catalog_storage::InMemoryCatalogStore;
pub use inmemory_storage::InMemoryClinicalStore;
pub use profile_storage::InMemoryProfileStore;
pub use storage_engine::{CatalogStore, ClinicalStore, ProfileStore};
