// models/src/dashboard.rs
use serde::{Deserialize, Serialize};

use crate::medical::{AIAnalysis, Patient};

/// Aggregates shown on the dashboard. Derived on request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_patients: usize,
    pub active_patients: usize,
    /// Placeholder figure, not a count of anything. See `pending_exams_synthetic`.
    pub pending_exams: u32,
    /// Always `true` until a real scheduled-exam entity exists.
    pub pending_exams_synthetic: bool,
    pub ai_analyses_this_month: usize,
    /// Up to five patients, most recently updated first.
    pub recent_patients: Vec<Patient>,
    /// The last three analyses in insertion order, regardless of `analyzedAt`.
    pub recent_analyses: Vec<AIAnalysis>,
}

/// Totals for the exam and medication catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub total_exams: usize,
    pub active_exams: usize,
    pub total_medications: usize,
    pub active_medications: usize,
}
