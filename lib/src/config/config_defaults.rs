// lib/src/config/config_defaults.rs
use crate::config::config_structs::{PendingExamsConfig, PendingExamsMode};

// Pending exams are drawn from 5..=14 unless configured otherwise.
pub const DEFAULT_PENDING_EXAMS_MIN: u32 = 5;
pub const DEFAULT_PENDING_EXAMS_MAX: u32 = 14;
pub const DEFAULT_PENDING_EXAMS_FIXED: u32 = 0;

pub fn default_seed_demo_data() -> bool { true }
pub fn default_pending_exams() -> PendingExamsConfig { PendingExamsConfig::default() }
pub fn default_pending_exams_mode() -> PendingExamsMode { PendingExamsMode::Random }
pub fn default_pending_exams_min() -> u32 { DEFAULT_PENDING_EXAMS_MIN }
pub fn default_pending_exams_max() -> u32 { DEFAULT_PENDING_EXAMS_MAX }
pub fn default_pending_exams_value() -> u32 { DEFAULT_PENDING_EXAMS_FIXED }
