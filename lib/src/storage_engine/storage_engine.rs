// lib/src/storage_engine/storage_engine.rs
use std::fmt::Debug;

use async_trait::async_trait;
use models::{
    AIAnalysis, CatalogSummary, DashboardStats, DoctorProfile, DoctorProfileUpdate, Exam, ExamUpdate,
    Medication, MedicationUpdate, NewAnalysis, NewExam, NewMedication, NewPatient, Patient,
    PatientUpdate, RecordId, StoreResult,
};

/// The authoritative holder of patients and AI analyses.
///
/// Lookups that miss return `None` (or `false` for deletes); only rejected
/// input produces an `Err`. A rejected write leaves the store untouched.
#[async_trait]
pub trait ClinicalStore: Debug + Send + Sync + 'static {
    /// A copy of every patient in insertion order.
    async fn list_patients(&self) -> Vec<Patient>;
    async fn get_patient(&self, id: &RecordId) -> Option<Patient>;
    /// Assigns a fresh id and sets both timestamps to now.
    async fn add_patient(&self, patient: NewPatient) -> StoreResult<Patient>;
    /// Shallow merge. `updatedAt` always moves forward; `id` and `createdAt`
    /// never change.
    async fn update_patient(&self, id: &RecordId, update: PatientUpdate) -> StoreResult<Option<Patient>>;
    /// Hard delete. Analyses that refer to the patient are left as they are.
    async fn delete_patient(&self, id: &RecordId) -> bool;
    /// Case-insensitive match on name or email, or a case-sensitive match on
    /// the cpf. An empty query matches everyone.
    async fn search_patients(&self, query: &str) -> Vec<Patient>;

    async fn list_analyses(&self) -> Vec<AIAnalysis>;
    async fn get_analysis(&self, id: &RecordId) -> Option<AIAnalysis>;
    async fn list_analyses_for_patient(&self, patient_id: &RecordId) -> Vec<AIAnalysis>;
    /// Assigns a fresh id and `analyzedAt`. The patient id is not checked.
    async fn add_analysis(&self, analysis: NewAnalysis) -> StoreResult<AIAnalysis>;

    async fn dashboard_stats(&self) -> DashboardStats;
}

/// Exams and medications offered by the clinic.
#[async_trait]
pub trait CatalogStore: Debug + Send + Sync + 'static {
    async fn list_exams(&self) -> Vec<Exam>;
    async fn get_exam(&self, id: &RecordId) -> Option<Exam>;
    async fn add_exam(&self, exam: NewExam) -> StoreResult<Exam>;
    async fn update_exam(&self, id: &RecordId, update: ExamUpdate) -> StoreResult<Option<Exam>>;
    async fn delete_exam(&self, id: &RecordId) -> bool;
    /// Case-insensitive match on name or description.
    async fn search_exams(&self, query: &str) -> Vec<Exam>;

    async fn list_medications(&self) -> Vec<Medication>;
    async fn get_medication(&self, id: &RecordId) -> Option<Medication>;
    async fn add_medication(&self, medication: NewMedication) -> StoreResult<Medication>;
    async fn update_medication(&self, id: &RecordId, update: MedicationUpdate) -> StoreResult<Option<Medication>>;
    async fn delete_medication(&self, id: &RecordId) -> bool;
    /// Case-insensitive match on name or active ingredient.
    async fn search_medications(&self, query: &str) -> Vec<Medication>;

    async fn summary(&self) -> CatalogSummary;
}

/// The single doctor profile behind the dashboard.
#[async_trait]
pub trait ProfileStore: Debug + Send + Sync + 'static {
    async fn get_profile(&self) -> DoctorProfile;
    async fn update_profile(&self, update: DoctorProfileUpdate) -> StoreResult<DoctorProfile>;
}
