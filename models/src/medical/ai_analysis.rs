// models/src/medical/ai_analysis.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{require_text, ValidationError, ValidationResult};
use crate::identifiers::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    #[default]
    CervicalCancerDetection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        f.write_str(s)
    }
}

/// The clinical context submitted alongside the images.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalInput {
    pub age: u32,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub previous_exams: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResults {
    pub risk_level: RiskLevel,
    pub confidence: f64, // fraction in [0, 1]
    #[serde(default)]
    pub findings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub requires_follow_up: bool,
}

impl AnalysisResults {
    pub fn validate(&self) -> ValidationResult<()> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(ValidationError::ConfidenceOutOfRange(self.confidence));
        }
        if self.risk_level != RiskLevel::Low && !self.requires_follow_up {
            return Err(ValidationError::FollowUpRequired(self.risk_level));
        }
        Ok(())
    }
}

/// A finished risk analysis. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIAnalysis {
    pub id: RecordId,
    pub patient_id: RecordId, // soft reference, the patient may since have been deleted
    #[serde(rename = "type")]
    pub analysis_type: AnalysisType,
    pub image_files: Vec<String>,
    pub clinical_data: ClinicalInput,
    pub results: AnalysisResults,
    pub analyzed_at: DateTime<Utc>,
    pub analyzed_by: String, // model name and version, e.g. "IA Medase v2.1"
}

/// The caller-supplied part of an analysis. The store assigns `id` and
/// `analyzedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnalysis {
    pub patient_id: RecordId,
    #[serde(rename = "type", default)]
    pub analysis_type: AnalysisType,
    pub image_files: Vec<String>,
    pub clinical_data: ClinicalInput,
    pub results: AnalysisResults,
    pub analyzed_by: String,
}

impl NewAnalysis {
    pub fn validate(&self) -> ValidationResult<()> {
        require_text("patientId", self.patient_id.as_str())?;
        if self.image_files.iter().all(|f| f.trim().is_empty()) {
            return Err(ValidationError::MissingImageFiles);
        }
        require_text("analyzedBy", &self.analyzed_by)?;
        self.results.validate()
    }

    pub fn into_analysis(self, id: RecordId, analyzed_at: DateTime<Utc>) -> AIAnalysis {
        AIAnalysis {
            id,
            patient_id: self.patient_id,
            analysis_type: self.analysis_type,
            image_files: self.image_files,
            clinical_data: self.clinical_data,
            results: self.results,
            analyzed_at,
            analyzed_by: self.analyzed_by,
        }
    }
}
