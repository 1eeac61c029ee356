// lib/src/stats/mod.rs

//! Dashboard statistics. A pure function over a snapshot of the domain
//! store, recomputed from scratch on every request.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use models::{AIAnalysis, DashboardStats, Patient};

pub const RECENT_PATIENTS_LIMIT: usize = 5;
pub const RECENT_ANALYSES_LIMIT: usize = 3;

/// Builds the dashboard figures.
///
/// `now` decides which calendar month counts as "this month"; its time zone
/// is the one the month boundary is drawn in. `pending_exams` is passed in
/// already sampled from the configured policy.
pub fn compute_dashboard_stats<Tz: TimeZone>(
    patients: &[Patient],
    analyses: &[AIAnalysis],
    now: &DateTime<Tz>,
    pending_exams: u32,
) -> DashboardStats {
    DashboardStats {
        total_patients: patients.len(),
        active_patients: patients.iter().filter(|p| p.is_active()).count(),
        pending_exams,
        pending_exams_synthetic: true,
        ai_analyses_this_month: analyses
            .iter()
            .filter(|a| same_calendar_month(&a.analyzed_at, now))
            .count(),
        recent_patients: recent_patients(patients),
        recent_analyses: recent_analyses(analyses),
    }
}

/// Most recently updated first. `sort_by` is stable, so equal timestamps keep
/// their collection order.
pub fn recent_patients(patients: &[Patient]) -> Vec<Patient> {
    let mut sorted = patients.to_vec();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(RECENT_PATIENTS_LIMIT);
    sorted
}

/// The tail of the collection in insertion order. This is not sorted by
/// `analyzedAt`, unlike `recent_patients`.
pub fn recent_analyses(analyses: &[AIAnalysis]) -> Vec<AIAnalysis> {
    let start = analyses.len().saturating_sub(RECENT_ANALYSES_LIMIT);
    analyses[start..].to_vec()
}

fn same_calendar_month<Tz: TimeZone>(at: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    let local = at.with_timezone(&now.timezone());
    local.year() == now.year() && local.month() == now.month()
}
