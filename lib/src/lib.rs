// lib/src/lib.rs

//! In-memory stores for the Medase service: patients and AI analyses, the
//! exam/medication catalogue and the doctor profile, plus the dashboard
//! statistics computed over them.
//!
//! Nothing here is global. Each store is constructed explicitly from a
//! `StoreConfig` and handed to its consumers behind an `Arc`.

pub mod clock;
pub mod config;
pub mod stats;
pub mod storage_engine;

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::{PendingExamsPolicy, StoreConfig};
pub use crate::stats::compute_dashboard_stats;
pub use crate::storage_engine::{
    CatalogStore, ClinicalStore, InMemoryCatalogStore, InMemoryClinicalStore, InMemoryProfileStore,
    ProfileStore,
};
