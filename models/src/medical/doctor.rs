// models/src/medical/doctor.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{require_email, require_text, ValidationResult};
use crate::identifiers::RecordId;
use crate::medical::Address;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub university: String,
    pub graduation_year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residency: Option<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
}

/// The account profile of the doctor using the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub license: String, // CRM registration, e.g. "CRM-SP 123456"
    pub specialty: String,
    pub institution: String,
    pub phone: String,
    pub address: Address,
    pub credentials: Credentials,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl DoctorProfile {
    pub fn validate(&self) -> ValidationResult<()> {
        require_text("name", &self.name)?;
        require_email(&self.email)?;
        require_text("license", &self.license)
    }
}

impl DoctorProfileUpdate {
    pub fn apply_to(self, profile: &mut DoctorProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(license) = self.license {
            profile.license = license;
        }
        if let Some(specialty) = self.specialty {
            profile.specialty = specialty;
        }
        if let Some(institution) = self.institution {
            profile.institution = institution;
        }
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        if let Some(address) = self.address {
            profile.address = address;
        }
        if let Some(credentials) = self.credentials {
            profile.credentials = credentials;
        }
    }
}
