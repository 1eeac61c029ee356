// lib/src/config/config_structs.rs
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::config_defaults::*;

/// Settings for the in-memory stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Load the demo patients, analysis, catalogue and profile at startup.
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
    #[serde(default = "default_pending_exams")]
    pub pending_exams: PendingExamsConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            seed_demo_data: default_seed_demo_data(),
            pending_exams: default_pending_exams(),
        }
    }
}

impl StoreConfig {
    /// An empty store with a deterministic pending-exams figure.
    pub fn unseeded(pending_exams: u32) -> Self {
        StoreConfig {
            seed_demo_data: false,
            pending_exams: PendingExamsConfig {
                mode: PendingExamsMode::Fixed,
                value: pending_exams,
                ..PendingExamsConfig::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingExamsMode {
    Random,
    Fixed,
}

/// How the dashboard's pending-exams figure is produced. There is no
/// scheduled-exam entity, so the figure is synthetic either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingExamsConfig {
    #[serde(default = "default_pending_exams_mode")]
    pub mode: PendingExamsMode,
    #[serde(default = "default_pending_exams_min")]
    pub min: u32,
    #[serde(default = "default_pending_exams_max")]
    pub max: u32,
    /// Used when `mode` is `fixed`.
    #[serde(default = "default_pending_exams_value")]
    pub value: u32,
}

impl Default for PendingExamsConfig {
    fn default() -> Self {
        PendingExamsConfig {
            mode: default_pending_exams_mode(),
            min: default_pending_exams_min(),
            max: default_pending_exams_max(),
            value: default_pending_exams_value(),
        }
    }
}

impl PendingExamsConfig {
    pub fn policy(&self) -> PendingExamsPolicy {
        match self.mode {
            PendingExamsMode::Fixed => PendingExamsPolicy::Fixed(self.value),
            PendingExamsMode::Random => PendingExamsPolicy::Random {
                min: self.min.min(self.max),
                max: self.min.max(self.max),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingExamsPolicy {
    /// Uniform in `min..=max`; `min <= max` always holds.
    Random { min: u32, max: u32 },
    Fixed(u32),
}

impl PendingExamsPolicy {
    pub fn sample(&self) -> u32 {
        match *self {
            PendingExamsPolicy::Fixed(value) => value,
            PendingExamsPolicy::Random { min, max } => rand::thread_rng().gen_range(min..=max),
        }
    }
}
