// models/src/medical/medication.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{require_text, ValidationResult};
use crate::identifiers::RecordId;
use crate::serializers::nullable;
use crate::medical::exam::default_active;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicationForm {
    #[default]
    Comprimido,
    Capsula,
    Liquido,
    Injetavel,
    Topico,
    Outros,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: RecordId,
    pub name: String,
    pub active_ingredient: String,
    pub dosage: String,
    pub form: MedicationForm,
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraindications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedication {
    pub name: String,
    pub active_ingredient: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub form: MedicationForm,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub contraindications: Option<String>,
    #[serde(default)]
    pub side_effects: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_ingredient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<MedicationForm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// `null` clears the stored value.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// `null` clears the stored value.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub contraindications: Option<Option<String>>,
    /// `null` clears the stored value.
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

fn validate_medication_fields(name: &str, active_ingredient: &str) -> ValidationResult<()> {
    require_text("name", name)?;
    require_text("activeIngredient", active_ingredient)
}

impl NewMedication {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_medication_fields(&self.name, &self.active_ingredient)
    }

    pub fn into_medication(self, id: RecordId, now: DateTime<Utc>) -> Medication {
        Medication {
            id,
            name: self.name,
            active_ingredient: self.active_ingredient,
            dosage: self.dosage,
            form: self.form,
            manufacturer: self.manufacturer,
            description: self.description,
            contraindications: self.contraindications,
            side_effects: self.side_effects,
            active: self.active,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Medication {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_medication_fields(&self.name, &self.active_ingredient)
    }

    pub fn matches_query(&self, lowercase_query: &str) -> bool {
        self.name.to_lowercase().contains(lowercase_query)
            || self.active_ingredient.to_lowercase().contains(lowercase_query)
    }
}

impl MedicationUpdate {
    pub fn apply_to(self, medication: &mut Medication) {
        if let Some(name) = self.name {
            medication.name = name;
        }
        if let Some(active_ingredient) = self.active_ingredient {
            medication.active_ingredient = active_ingredient;
        }
        if let Some(dosage) = self.dosage {
            medication.dosage = dosage;
        }
        if let Some(form) = self.form {
            medication.form = form;
        }
        if let Some(manufacturer) = self.manufacturer {
            medication.manufacturer = manufacturer;
        }
        if let Some(description) = self.description {
            medication.description = description;
        }
        if let Some(contraindications) = self.contraindications {
            medication.contraindications = contraindications;
        }
        if let Some(side_effects) = self.side_effects {
            medication.side_effects = side_effects;
        }
        if let Some(active) = self.active {
            medication.active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;

    #[test]
    fn requires_active_ingredient() {
        let med: NewMedication = serde_json::from_value(serde_json::json!({
            "name": "Paracetamol 500mg",
            "activeIngredient": " ",
        }))
        .unwrap();
        assert_eq!(med.validate(), Err(ValidationError::RequiredFieldMissing("activeIngredient")));
    }

    #[test]
    fn search_matches_active_ingredient() {
        let med: NewMedication = serde_json::from_value(serde_json::json!({
            "name": "Ibuprofeno 600mg",
            "activeIngredient": "Ibuprofeno",
            "dosage": "600mg",
            "form": "comprimido",
            "manufacturer": "Medley"
        }))
        .unwrap();
        let med = med.into_medication(RecordId::new("2").unwrap(), Utc::now());
        assert!(med.active);
        assert!(med.matches_query("ibupro"));
        assert!(!med.matches_query("medley"));
    }

    #[test]
    fn update_can_clear_contraindications() {
        let med: NewMedication = serde_json::from_value(serde_json::json!({
            "name": "Paracetamol 500mg",
            "activeIngredient": "Paracetamol",
            "description": "Analgésico e antitérmico",
            "contraindications": "Hipersensibilidade ao paracetamol"
        }))
        .unwrap();
        let mut med = med.into_medication(RecordId::new("1").unwrap(), Utc::now());
        let update: MedicationUpdate =
            serde_json::from_value(serde_json::json!({ "contraindications": null })).unwrap();
        update.apply_to(&mut med);
        assert_eq!(med.contraindications, None);
        assert_eq!(med.description.as_deref(), Some("Analgésico e antitérmico"));
    }
}
