// models/src/medical/mod.rs

pub mod address;
pub mod ai_analysis;
pub mod doctor;
pub mod exam;
pub mod medication;
pub mod patient;

pub use address::Address;
pub use ai_analysis::{AIAnalysis, AnalysisResults, AnalysisType, ClinicalInput, NewAnalysis, RiskLevel};
pub use doctor::{Credentials, DoctorProfile, DoctorProfileUpdate};
pub use exam::{Exam, ExamCategory, ExamUpdate, NewExam};
pub use medication::{Medication, MedicationForm, MedicationUpdate, NewMedication};
pub use patient::{ClinicalData, EmergencyContact, Gender, NewPatient, Patient, PatientStatus, PatientUpdate};
