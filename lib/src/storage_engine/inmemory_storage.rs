// lib/src/storage_engine/inmemory_storage.rs
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use log::{debug, info, warn};
use models::{
    AIAnalysis, DashboardStats, NewAnalysis, NewPatient, Patient, PatientUpdate, RecordId, StoreResult,
};
use tokio::sync::RwLock;

use super::seed::{demo_analyses, demo_patients};
use super::storage_engine::ClinicalStore;
use crate::clock::{next_update_timestamp, Clock, SystemClock};
use crate::config::{PendingExamsPolicy, StoreConfig};
use crate::stats::compute_dashboard_stats;

// Both collections sit behind one lock so the dashboard always sees a
// consistent pair.
#[derive(Debug, Default)]
struct ClinicalCollections {
    patients: Vec<Patient>,
    analyses: Vec<AIAnalysis>,
}

/// In-memory implementation of `ClinicalStore`. Clones share the same data.
#[derive(Debug, Clone)]
pub struct InMemoryClinicalStore {
    collections: Arc<RwLock<ClinicalCollections>>,
    clock: Arc<dyn Clock>,
    pending_exams: PendingExamsPolicy,
}

impl InMemoryClinicalStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let collections = if config.seed_demo_data {
            ClinicalCollections { patients: demo_patients(), analyses: demo_analyses() }
        } else {
            ClinicalCollections::default()
        };
        info!(
            "Clinical store ready with {} patients and {} analyses",
            collections.patients.len(),
            collections.analyses.len()
        );
        InMemoryClinicalStore {
            collections: Arc::new(RwLock::new(collections)),
            clock,
            pending_exams: config.pending_exams.policy(),
        }
    }
}

pub(crate) fn unused_id(mut taken: impl FnMut(&RecordId) -> bool) -> RecordId {
    loop {
        let id = RecordId::generate();
        if !taken(&id) {
            return id;
        }
    }
}

#[async_trait]
impl ClinicalStore for InMemoryClinicalStore {
    async fn list_patients(&self) -> Vec<Patient> {
        self.collections.read().await.patients.clone()
    }

    async fn get_patient(&self, id: &RecordId) -> Option<Patient> {
        let collections = self.collections.read().await;
        let found = collections.patients.iter().find(|p| &p.id == id).cloned();
        if found.is_none() {
            debug!("Patient {} not found", id);
        }
        found
    }

    async fn add_patient(&self, patient: NewPatient) -> StoreResult<Patient> {
        if let Err(e) = patient.validate() {
            warn!("Rejected new patient: {}", e);
            return Err(e.into());
        }
        let mut collections = self.collections.write().await;
        let id = unused_id(|candidate| collections.patients.iter().any(|p| &p.id == candidate));
        let created = patient.into_patient(id, self.clock.now());
        collections.patients.push(created.clone());
        info!("Added patient {}", created.id);
        Ok(created)
    }

    async fn update_patient(&self, id: &RecordId, update: PatientUpdate) -> StoreResult<Option<Patient>> {
        let mut collections = self.collections.write().await;
        let Some(index) = collections.patients.iter().position(|p| &p.id == id) else {
            debug!("Update skipped, patient {} not found", id);
            return Ok(None);
        };

        // Merge into a copy so a rejected update leaves the stored record as it was.
        let mut merged = collections.patients[index].clone();
        update.apply_to(&mut merged);
        if let Err(e) = merged.validate() {
            warn!("Rejected update for patient {}: {}", id, e);
            return Err(e.into());
        }
        merged.updated_at = next_update_timestamp(self.clock.as_ref(), merged.updated_at);

        collections.patients[index] = merged.clone();
        info!("Updated patient {}", id);
        Ok(Some(merged))
    }

    async fn delete_patient(&self, id: &RecordId) -> bool {
        let mut collections = self.collections.write().await;
        match collections.patients.iter().position(|p| &p.id == id) {
            Some(index) => {
                collections.patients.remove(index);
                info!("Deleted patient {}", id);
                true
            }
            None => {
                debug!("Delete skipped, patient {} not found", id);
                false
            }
        }
    }

    async fn search_patients(&self, query: &str) -> Vec<Patient> {
        let lowercase_query = query.to_lowercase();
        let collections = self.collections.read().await;
        collections
            .patients
            .iter()
            .filter(|p| p.matches_query(query, &lowercase_query))
            .cloned()
            .collect()
    }

    async fn list_analyses(&self) -> Vec<AIAnalysis> {
        self.collections.read().await.analyses.clone()
    }

    async fn get_analysis(&self, id: &RecordId) -> Option<AIAnalysis> {
        let collections = self.collections.read().await;
        collections.analyses.iter().find(|a| &a.id == id).cloned()
    }

    async fn list_analyses_for_patient(&self, patient_id: &RecordId) -> Vec<AIAnalysis> {
        let collections = self.collections.read().await;
        collections
            .analyses
            .iter()
            .filter(|a| &a.patient_id == patient_id)
            .cloned()
            .collect()
    }

    async fn add_analysis(&self, analysis: NewAnalysis) -> StoreResult<AIAnalysis> {
        if let Err(e) = analysis.validate() {
            warn!("Rejected analysis for patient {}: {}", analysis.patient_id, e);
            return Err(e.into());
        }
        let mut collections = self.collections.write().await;
        if !collections.patients.iter().any(|p| p.id == analysis.patient_id) {
            debug!("Analysis refers to unknown patient {}", analysis.patient_id);
        }
        let id = unused_id(|candidate| collections.analyses.iter().any(|a| &a.id == candidate));
        let created = analysis.into_analysis(id, self.clock.now());
        collections.analyses.push(created.clone());
        info!(
            "Added {} risk analysis {} for patient {}",
            created.results.risk_level, created.id, created.patient_id
        );
        Ok(created)
    }

    async fn dashboard_stats(&self) -> DashboardStats {
        let collections = self.collections.read().await;
        let now = self.clock.now().with_timezone(&Local);
        compute_dashboard_stats(
            &collections.patients,
            &collections.analyses,
            &now,
            self.pending_exams.sample(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
    use models::{
        Address, AnalysisResults, AnalysisType, ClinicalData, ClinicalInput, EmergencyContact, Gender,
        PatientStatus, RiskLevel, StoreError, ValidationError,
    };
    use std::collections::HashSet;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn new_patient(name: &str, email: &str, cpf: &str) -> NewPatient {
        NewPatient {
            name: name.into(),
            email: email.into(),
            phone: "(11) 90000-0000".into(),
            cpf: cpf.into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 20).unwrap(),
            gender: Gender::Female,
            address: Address {
                street: "Rua A".into(),
                number: "1".into(),
                complement: None,
                city: "Campinas".into(),
                state: "SP".into(),
                zip_code: "13000-000".into(),
            },
            clinical_data: ClinicalData {
                blood_type: "AB-".into(),
                allergies: vec!["Dipirona".into()],
                ..ClinicalData::default()
            },
            emergency_contact: EmergencyContact {
                name: "Carlos".into(),
                relationship: "Pai".into(),
                phone: "(11) 91111-1111".into(),
            },
            status: PatientStatus::Active,
        }
    }

    fn new_analysis(patient_id: &RecordId) -> NewAnalysis {
        NewAnalysis {
            patient_id: patient_id.clone(),
            analysis_type: AnalysisType::CervicalCancerDetection,
            image_files: vec!["slide.png".into()],
            clinical_data: ClinicalInput { age: 35, ..ClinicalInput::default() },
            results: AnalysisResults {
                risk_level: RiskLevel::High,
                confidence: 0.91,
                findings: vec!["Células anômalas detectadas".into()],
                recommendations: vec!["Colposcopia urgente".into()],
                requires_follow_up: true,
            },
            analyzed_by: "IA Medase v2.1".into(),
        }
    }

    fn empty_store(clock: &ManualClock) -> InMemoryClinicalStore {
        InMemoryClinicalStore::with_clock(&StoreConfig::unseeded(9), Arc::new(clock.clone()))
    }

    fn seeded_store(clock: &ManualClock) -> InMemoryClinicalStore {
        let config = StoreConfig { seed_demo_data: true, ..StoreConfig::unseeded(9) };
        InMemoryClinicalStore::with_clock(&config, Arc::new(clock.clone()))
    }

    #[tokio::test]
    async fn add_assigns_distinct_ids() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        let mut ids = HashSet::new();
        for i in 0..50 {
            let p = store
                .add_patient(new_patient(&format!("P{i}"), "p@email.com", "111"))
                .await
                .unwrap();
            ids.insert(p.id);
        }
        assert_eq!(ids.len(), 50);
        assert_eq!(store.list_patients().await.len(), 50);
    }

    #[tokio::test]
    async fn created_patient_round_trips() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        let input = new_patient("Beatriz Lima", "bia@email.com", "222.333.444-55");
        let created = store.add_patient(input.clone()).await.unwrap();
        assert_eq!(created.created_at, noon(2026, 10, 17));
        assert_eq!(created.updated_at, created.created_at);

        let fetched = store.get_patient(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        let expected = input.into_patient(created.id.clone(), created.created_at);
        assert_eq!(fetched, expected);
    }

    #[tokio::test]
    async fn list_returns_a_copy() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = seeded_store(&clock);
        let mut listed = store.list_patients().await;
        listed[0].name = "Changed".into();
        listed.clear();
        let again = store.list_patients().await;
        assert_eq!(again.len(), 2);
        assert_eq!(again[0].name, "Maria Silva Santos");
    }

    #[tokio::test]
    async fn update_changes_only_the_given_fields() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        let before = store.add_patient(new_patient("Clara", "clara@email.com", "333")).await.unwrap();

        let update = PatientUpdate { status: Some(PatientStatus::Inactive), ..Default::default() };
        let after = store.update_patient(&before.id, update).await.unwrap().unwrap();

        assert_eq!(after.status, PatientStatus::Inactive);
        assert!(after.updated_at > before.updated_at);
        let restored = Patient { status: before.status, updated_at: before.updated_at, ..after.clone() };
        assert_eq!(restored, before);
        assert_eq!(store.get_patient(&before.id).await.unwrap(), after);
    }

    #[tokio::test]
    async fn update_uses_the_clock_when_it_has_advanced() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        let p = store.add_patient(new_patient("Clara", "clara@email.com", "333")).await.unwrap();
        clock.advance(Duration::hours(3));
        let update = PatientUpdate { phone: Some("(11) 95555-5555".into()), ..Default::default() };
        let updated = store.update_patient(&p.id, update).await.unwrap().unwrap();
        assert_eq!(updated.updated_at, noon(2026, 10, 17) + Duration::hours(3));
        assert_eq!(updated.created_at, p.created_at);
    }

    #[tokio::test]
    async fn forged_identity_fields_are_ignored() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        let p = store.add_patient(new_patient("Clara", "clara@email.com", "333")).await.unwrap();
        let update: PatientUpdate = serde_json::from_value(serde_json::json!({
            "id": "999",
            "createdAt": "2000-01-01T00:00:00Z",
            "updatedAt": "2000-01-01T00:00:00Z",
            "name": "Clara Souza"
        }))
        .unwrap();
        let updated = store.update_patient(&p.id, update).await.unwrap().unwrap();
        assert_eq!(updated.id, p.id);
        assert_eq!(updated.created_at, p.created_at);
        assert!(updated.updated_at > p.updated_at);
        assert_eq!(updated.name, "Clara Souza");
        assert!(store.get_patient(&RecordId::new("999").unwrap()).await.is_none());
    }

    #[tokio::test]
    async fn update_of_missing_patient_is_none() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = seeded_store(&clock);
        let update = PatientUpdate { name: Some("X".into()), ..Default::default() };
        let result = store.update_patient(&RecordId::new("nope").unwrap(), update).await;
        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn rejected_update_leaves_record_untouched() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = seeded_store(&clock);
        let id = RecordId::from(1);
        let before = store.get_patient(&id).await.unwrap();
        let update = PatientUpdate {
            name: Some("Maria S.".into()),
            email: Some("not-an-email".into()),
            ..Default::default()
        };
        let err = store.update_patient(&id, update).await.unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::InvalidEmail("not-an-email".into())));
        assert_eq!(store.get_patient(&id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn invalid_new_patient_is_not_stored() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        let err = store.add_patient(new_patient("", "a@b.c", "1")).await.unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::RequiredFieldMissing("name")));
        assert!(store.list_patients().await.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_patient_changes_nothing() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = seeded_store(&clock);
        assert!(!store.delete_patient(&RecordId::new("404").unwrap()).await);
        assert_eq!(store.list_patients().await.len(), 2);
    }

    #[tokio::test]
    async fn delete_keeps_the_patients_analyses() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = seeded_store(&clock);
        let maria = RecordId::from(1);
        assert!(store.delete_patient(&maria).await);
        assert!(store.get_patient(&maria).await.is_none());
        assert_eq!(store.list_patients().await.len(), 1);
        assert_eq!(store.list_analyses_for_patient(&maria).await.len(), 1);
        assert!(!store.delete_patient(&maria).await);
    }

    #[tokio::test]
    async fn search_matches_name_email_and_cpf() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = seeded_store(&clock);

        let found = store.search_patients("maria").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Maria Silva Santos");

        let found = store.search_patients("OLIVEIRA@").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, RecordId::from(2));

        let found = store.search_patients("987.654").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, RecordId::from(2));

        assert!(store.search_patients("zzz").await.is_empty());
    }

    #[tokio::test]
    async fn search_cpf_uses_query_as_typed() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        store.add_patient(new_patient("Joana", "joana@email.com", "AB-123")).await.unwrap();
        assert_eq!(store.search_patients("AB-1").await.len(), 1);
        // Lowercased query still misses the cpf, and nothing else matches "ab-1".
        assert!(store.search_patients("ab-1").await.is_empty());
    }

    #[tokio::test]
    async fn empty_search_returns_everyone() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = seeded_store(&clock);
        assert_eq!(store.search_patients("").await.len(), 2);
    }

    #[tokio::test]
    async fn analysis_gets_id_and_timestamp_without_patient_check() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        let ghost = RecordId::new("ghost").unwrap();
        let created = store.add_analysis(new_analysis(&ghost)).await.unwrap();
        assert_eq!(created.analyzed_at, noon(2026, 10, 17));
        assert_eq!(created.patient_id, ghost);
        assert_eq!(store.get_analysis(&created.id).await.unwrap(), created);
        assert_eq!(store.list_analyses_for_patient(&ghost).await, vec![created]);
    }

    #[tokio::test]
    async fn invalid_analysis_is_rejected() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        let mut analysis = new_analysis(&RecordId::from(1));
        analysis.results.confidence = 1.5;
        let err = store.add_analysis(analysis).await.unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::ConfidenceOutOfRange(1.5)));
        assert!(store.list_analyses().await.is_empty());
    }

    #[tokio::test]
    async fn analyses_for_patient_keep_insertion_order() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        let a = RecordId::from(1);
        let b = RecordId::from(2);
        let first = store.add_analysis(new_analysis(&a)).await.unwrap();
        store.add_analysis(new_analysis(&b)).await.unwrap();
        clock.set(noon(2020, 1, 1));
        let third = store.add_analysis(new_analysis(&a)).await.unwrap();
        let ids: Vec<RecordId> = store.list_analyses_for_patient(&a).await.into_iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![first.id, third.id]);
    }

    #[tokio::test]
    async fn dashboard_stats_over_two_active_patients() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        store.add_patient(new_patient("Maria", "maria@email.com", "1")).await.unwrap();
        clock.advance(Duration::minutes(1));
        let newer = store.add_patient(new_patient("Ana", "ana@email.com", "2")).await.unwrap();

        let stats = store.dashboard_stats().await;
        assert_eq!(stats.total_patients, 2);
        assert_eq!(stats.active_patients, 2);
        assert_eq!(stats.pending_exams, 9);
        assert!(stats.pending_exams_synthetic);
        assert!(stats.recent_patients.len() <= 5);
        assert_eq!(stats.recent_patients[0].id, newer.id);
        assert!(stats.recent_patients[0].updated_at >= stats.recent_patients[1].updated_at);
    }

    #[tokio::test]
    async fn recent_analyses_keep_insertion_order_over_timestamps() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = empty_store(&clock);
        let p = RecordId::from(1);
        let first = store.add_analysis(new_analysis(&p)).await.unwrap();
        clock.set(noon(2026, 10, 1));
        let earlier_but_later_inserted = store.add_analysis(new_analysis(&p)).await.unwrap();
        clock.set(noon(2026, 10, 17));

        let stats = store.dashboard_stats().await;
        let ids: Vec<RecordId> = stats.recent_analyses.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![first.id, earlier_but_later_inserted.id]);
    }

    #[tokio::test]
    async fn analyses_this_month_ignore_prior_months() {
        let clock = ManualClock::new(noon(2026, 8, 15));
        let store = empty_store(&clock);
        let p = RecordId::from(1);
        store.add_analysis(new_analysis(&p)).await.unwrap();
        clock.set(noon(2026, 10, 10));
        store.add_analysis(new_analysis(&p)).await.unwrap();
        clock.set(noon(2026, 10, 17));

        assert_eq!(store.dashboard_stats().await.ai_analyses_this_month, 1);
    }

    #[tokio::test]
    async fn stats_do_not_reorder_the_store() {
        let clock = ManualClock::new(noon(2026, 10, 17));
        let store = seeded_store(&clock);
        let before: Vec<RecordId> = store.list_patients().await.into_iter().map(|p| p.id).collect();
        let stats = store.dashboard_stats().await;
        assert_eq!(stats.recent_patients[0].id, RecordId::from(2));
        let after: Vec<RecordId> = store.list_patients().await.into_iter().map(|p| p.id).collect();
        assert_eq!(before, after);
    }
}
