// models/src/lib.rs

//! Domain types for the Medase clinical-record service: patients, AI risk
//! analyses, the exam/medication catalogue and the doctor profile, plus the
//! validation and error types the stores report.

pub mod dashboard;
pub mod errors;
pub mod identifiers;
pub mod medical;
pub mod serializers;

pub use dashboard::{CatalogSummary, DashboardStats};
pub use errors::{StoreError, StoreResult, ValidationError, ValidationResult};
pub use identifiers::RecordId;
pub use medical::*;
