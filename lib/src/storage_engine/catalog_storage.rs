// lib/src/storage_engine/catalog_storage.rs
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use models::{
    CatalogSummary, Exam, ExamUpdate, Medication, MedicationUpdate, NewExam, NewMedication, RecordId,
    StoreResult,
};
use tokio::sync::RwLock;

use super::inmemory_storage::unused_id;
use super::seed::{demo_exams, demo_medications};
use super::storage_engine::CatalogStore;
use crate::clock::{next_update_timestamp, Clock, SystemClock};
use crate::config::StoreConfig;

#[derive(Debug, Default)]
struct CatalogCollections {
    exams: Vec<Exam>,
    medications: Vec<Medication>,
}

/// In-memory implementation of `CatalogStore`.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogStore {
    collections: Arc<RwLock<CatalogCollections>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCatalogStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let collections = if config.seed_demo_data {
            CatalogCollections { exams: demo_exams(), medications: demo_medications() }
        } else {
            CatalogCollections::default()
        };
        InMemoryCatalogStore { collections: Arc::new(RwLock::new(collections)), clock }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn list_exams(&self) -> Vec<Exam> {
        self.collections.read().await.exams.clone()
    }

    async fn get_exam(&self, id: &RecordId) -> Option<Exam> {
        self.collections.read().await.exams.iter().find(|e| &e.id == id).cloned()
    }

    async fn add_exam(&self, exam: NewExam) -> StoreResult<Exam> {
        if let Err(e) = exam.validate() {
            warn!("Rejected new exam: {}", e);
            return Err(e.into());
        }
        let mut collections = self.collections.write().await;
        let id = unused_id(|candidate| collections.exams.iter().any(|e| &e.id == candidate));
        let created = exam.into_exam(id, self.clock.now());
        collections.exams.push(created.clone());
        info!("Added exam {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn update_exam(&self, id: &RecordId, update: ExamUpdate) -> StoreResult<Option<Exam>> {
        let mut collections = self.collections.write().await;
        let Some(index) = collections.exams.iter().position(|e| &e.id == id) else {
            debug!("Update skipped, exam {} not found", id);
            return Ok(None);
        };
        let mut merged = collections.exams[index].clone();
        update.apply_to(&mut merged);
        if let Err(e) = merged.validate() {
            warn!("Rejected update for exam {}: {}", id, e);
            return Err(e.into());
        }
        merged.updated_at = next_update_timestamp(self.clock.as_ref(), merged.updated_at);
        collections.exams[index] = merged.clone();
        info!("Updated exam {}", id);
        Ok(Some(merged))
    }

    async fn delete_exam(&self, id: &RecordId) -> bool {
        let mut collections = self.collections.write().await;
        let before = collections.exams.len();
        collections.exams.retain(|e| &e.id != id);
        let removed = collections.exams.len() != before;
        if removed {
            info!("Deleted exam {}", id);
        }
        removed
    }

    async fn search_exams(&self, query: &str) -> Vec<Exam> {
        let lowercase_query = query.to_lowercase();
        let collections = self.collections.read().await;
        collections.exams.iter().filter(|e| e.matches_query(&lowercase_query)).cloned().collect()
    }

    async fn list_medications(&self) -> Vec<Medication> {
        self.collections.read().await.medications.clone()
    }

    async fn get_medication(&self, id: &RecordId) -> Option<Medication> {
        self.collections.read().await.medications.iter().find(|m| &m.id == id).cloned()
    }

    async fn add_medication(&self, medication: NewMedication) -> StoreResult<Medication> {
        if let Err(e) = medication.validate() {
            warn!("Rejected new medication: {}", e);
            return Err(e.into());
        }
        let mut collections = self.collections.write().await;
        let id = unused_id(|candidate| collections.medications.iter().any(|m| &m.id == candidate));
        let created = medication.into_medication(id, self.clock.now());
        collections.medications.push(created.clone());
        info!("Added medication {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn update_medication(&self, id: &RecordId, update: MedicationUpdate) -> StoreResult<Option<Medication>> {
        let mut collections = self.collections.write().await;
        let Some(index) = collections.medications.iter().position(|m| &m.id == id) else {
            debug!("Update skipped, medication {} not found", id);
            return Ok(None);
        };
        let mut merged = collections.medications[index].clone();
        update.apply_to(&mut merged);
        if let Err(e) = merged.validate() {
            warn!("Rejected update for medication {}: {}", id, e);
            return Err(e.into());
        }
        merged.updated_at = next_update_timestamp(self.clock.as_ref(), merged.updated_at);
        collections.medications[index] = merged.clone();
        info!("Updated medication {}", id);
        Ok(Some(merged))
    }

    async fn delete_medication(&self, id: &RecordId) -> bool {
        let mut collections = self.collections.write().await;
        let before = collections.medications.len();
        collections.medications.retain(|m| &m.id != id);
        let removed = collections.medications.len() != before;
        if removed {
            info!("Deleted medication {}", id);
        }
        removed
    }

    async fn search_medications(&self, query: &str) -> Vec<Medication> {
        let lowercase_query = query.to_lowercase();
        let collections = self.collections.read().await;
        collections
            .medications
            .iter()
            .filter(|m| m.matches_query(&lowercase_query))
            .cloned()
            .collect()
    }

    async fn summary(&self) -> CatalogSummary {
        let collections = self.collections.read().await;
        CatalogSummary {
            total_exams: collections.exams.len(),
            active_exams: collections.exams.iter().filter(|e| e.active).count(),
            total_medications: collections.medications.len(),
            active_medications: collections.medications.iter().filter(|m| m.active).count(),
        }
    }
}
