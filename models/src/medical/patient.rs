// models/src/medical/patient.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{require_email, require_text, ValidationResult};
use crate::identifiers::RecordId;
use crate::medical::Address;
use crate::serializers::optional_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalData {
    #[serde(default)]
    pub blood_type: String, // e.g. "A+", "O-"
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default, deserialize_with = "optional_date")]
    pub last_exam: Option<NaiveDate>,
    #[serde(default)]
    pub observations: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

/// A patient record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub cpf: String, // national taxpayer id, kept in its formatted form "123.456.789-00"
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub address: Address,
    pub clinical_data: ClinicalData,
    pub emergency_contact: EmergencyContact,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub status: PatientStatus,
}

/// The caller-supplied part of a patient. The store assigns `id`,
/// `createdAt` and `updatedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub cpf: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub address: Address,
    #[serde(default)]
    pub clinical_data: ClinicalData,
    #[serde(default)]
    pub emergency_contact: EmergencyContact,
    #[serde(default)]
    pub status: PatientStatus,
}

/// A partial update. Every present field replaces the stored one whole;
/// nested records are not merged. There is deliberately no `id`,
/// `createdAt` or `updatedAt` here, so those keys in a JSON payload are
/// dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_data: Option<ClinicalData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PatientStatus>,
}

fn validate_identity(name: &str, email: &str, cpf: &str) -> ValidationResult<()> {
    require_text("name", name)?;
    require_email(email)?;
    require_text("cpf", cpf)
}

impl NewPatient {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_identity(&self.name, &self.email, &self.cpf)
    }

    /// Builds the stored record. `created_at` and `updated_at` both start at
    /// `now`.
    pub fn into_patient(self, id: RecordId, now: DateTime<Utc>) -> Patient {
        Patient {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            cpf: self.cpf,
            birth_date: self.birth_date,
            gender: self.gender,
            address: self.address,
            clinical_data: self.clinical_data,
            emergency_contact: self.emergency_contact,
            created_at: now,
            updated_at: now,
            status: self.status,
        }
    }
}

impl Patient {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_identity(&self.name, &self.email, &self.cpf)
    }

    pub fn is_active(&self) -> bool {
        self.status == PatientStatus::Active
    }

    /// Whether this patient matches a free-text search. Name and email match
    /// case-insensitively; the cpf matches against the query exactly as typed.
    pub fn matches_query(&self, query: &str, lowercase_query: &str) -> bool {
        self.name.to_lowercase().contains(lowercase_query)
            || self.email.to_lowercase().contains(lowercase_query)
            || self.cpf.contains(query)
    }
}

impl PatientUpdate {
    /// Applies the present fields to `patient`. Timestamps are the caller's
    /// business.
    pub fn apply_to(self, patient: &mut Patient) {
        if let Some(name) = self.name {
            patient.name = name;
        }
        if let Some(email) = self.email {
            patient.email = email;
        }
        if let Some(phone) = self.phone {
            patient.phone = phone;
        }
        if let Some(cpf) = self.cpf {
            patient.cpf = cpf;
        }
        if let Some(birth_date) = self.birth_date {
            patient.birth_date = birth_date;
        }
        if let Some(gender) = self.gender {
            patient.gender = gender;
        }
        if let Some(address) = self.address {
            patient.address = address;
        }
        if let Some(clinical_data) = self.clinical_data {
            patient.clinical_data = clinical_data;
        }
        if let Some(emergency_contact) = self.emergency_contact {
            patient.emergency_contact = emergency_contact;
        }
        if let Some(status) = self.status {
            patient.status = status;
        }
    }
}
