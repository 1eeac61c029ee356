// lib/src/storage_engine/profile_storage.rs
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use models::{DoctorProfile, DoctorProfileUpdate, StoreResult};
use tokio::sync::RwLock;

use super::seed::{blank_profile, demo_profile};
use super::storage_engine::ProfileStore;
use crate::clock::{next_update_timestamp, Clock, SystemClock};
use crate::config::StoreConfig;

#[derive(Debug, Clone)]
pub struct InMemoryProfileStore {
    profile: Arc<RwLock<DoctorProfile>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryProfileStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let profile = if config.seed_demo_data { demo_profile() } else { blank_profile(clock.now()) };
        InMemoryProfileStore { profile: Arc::new(RwLock::new(profile)), clock }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self) -> DoctorProfile {
        self.profile.read().await.clone()
    }

    async fn update_profile(&self, update: DoctorProfileUpdate) -> StoreResult<DoctorProfile> {
        let mut profile = self.profile.write().await;
        let mut merged = profile.clone();
        update.apply_to(&mut merged);
        if let Err(e) = merged.validate() {
            warn!("Rejected profile update: {}", e);
            return Err(e.into());
        }
        merged.updated_at = next_update_timestamp(self.clock.as_ref(), merged.updated_at);
        *profile = merged.clone();
        info!("Updated doctor profile {}", merged.id);
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{TimeZone, Utc};
    use models::{Credentials, StoreError, ValidationError};

    #[tokio::test]
    async fn update_keeps_identity_and_bumps_timestamp() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap());
        let store = InMemoryProfileStore::with_clock(&StoreConfig::default(), Arc::new(clock.clone()));
        let before = store.get_profile().await;

        let update = DoctorProfileUpdate {
            specialty: Some("Oncologia".into()),
            credentials: Some(Credentials {
                university: "UNIFESP".into(),
                graduation_year: 2012,
                residency: None,
                specializations: vec![],
            }),
            ..Default::default()
        };
        let after = store.update_profile(update).await.unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.updated_at, clock.now());
        assert_eq!(after.specialty, "Oncologia");
        assert_eq!(after.name, before.name);
        // Credentials are replaced whole.
        assert!(after.credentials.specializations.is_empty());
        assert_eq!(store.get_profile().await, after);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let store = InMemoryProfileStore::new(&StoreConfig::default());
        let before = store.get_profile().await;
        let update = DoctorProfileUpdate { email: Some("admin".into()), ..Default::default() };
        let err = store.update_profile(update).await.unwrap_err();
        assert_eq!(err, StoreError::Validation(ValidationError::InvalidEmail("admin".into())));
        assert_eq!(store.get_profile().await, before);
    }

    #[tokio::test]
    async fn blank_profile_must_be_completed_in_one_update() {
        let store = InMemoryProfileStore::new(&StoreConfig::unseeded(0));
        let partial = DoctorProfileUpdate { name: Some("Dra. Paula".into()), ..Default::default() };
        assert!(store.update_profile(partial).await.is_err());

        let full = DoctorProfileUpdate {
            name: Some("Dra. Paula".into()),
            email: Some("paula@medase.com".into()),
            license: Some("CRM-RJ 654321".into()),
            ..Default::default()
        };
        let profile = store.update_profile(full).await.unwrap();
        assert_eq!(profile.license, "CRM-RJ 654321");
    }
}
