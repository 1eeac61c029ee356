// models/src/medical/exam.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{require_text, ValidationError, ValidationResult};
use crate::identifiers::RecordId;
use crate::serializers::nullable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamCategory {
    #[default]
    Laboratorial,
    Imagem,
    Funcional,
    Outros,
}

/// An exam offered by the clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub category: ExamCategory,
    pub price: f64,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExam {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: ExamCategory,
    #[serde(default)]
    pub price: f64,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    #[serde(default)]
    pub preparation: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ExamCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "duration", default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// `null` clears the stored value.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub preparation: Option<Option<String>>,
    /// `null` clears the stored value.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub observations: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

pub(crate) fn default_active() -> bool {
    true
}

fn validate_exam_fields(name: &str, price: f64, duration_minutes: u32) -> ValidationResult<()> {
    require_text("name", name)?;
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::InvalidPrice(price));
    }
    if duration_minutes == 0 {
        return Err(ValidationError::InvalidDuration);
    }
    Ok(())
}

impl NewExam {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_exam_fields(&self.name, self.price, self.duration_minutes)
    }

    pub fn into_exam(self, id: RecordId, now: DateTime<Utc>) -> Exam {
        Exam {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            price: self.price,
            duration_minutes: self.duration_minutes,
            preparation: self.preparation,
            observations: self.observations,
            active: self.active,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Exam {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_exam_fields(&self.name, self.price, self.duration_minutes)
    }

    pub fn matches_query(&self, lowercase_query: &str) -> bool {
        self.name.to_lowercase().contains(lowercase_query)
            || self.description.to_lowercase().contains(lowercase_query)
    }
}

impl ExamUpdate {
    pub fn apply_to(self, exam: &mut Exam) {
        if let Some(name) = self.name {
            exam.name = name;
        }
        if let Some(description) = self.description {
            exam.description = description;
        }
        if let Some(category) = self.category {
            exam.category = category;
        }
        if let Some(price) = self.price {
            exam.price = price;
        }
        if let Some(duration) = self.duration_minutes {
            exam.duration_minutes = duration;
        }
        if let Some(preparation) = self.preparation {
            exam.preparation = preparation;
        }
        if let Some(observations) = self.observations {
            exam.observations = observations;
        }
        if let Some(active) = self.active {
            exam.active = active;
        }
    }
}
