// models/src/identifiers.rs

use core::ops::Deref;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ValidationError, ValidationResult};

/// An opaque record identifier. Identifiers are assigned by the store when a
/// record is created and never change afterwards.
///
/// Seeded demo records use short numeric ids ("1", "2"); records created at
/// runtime get a random UUID, so the two never collide.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Creates an identifier from an existing value.
    ///
    /// # Errors
    /// Returns a `ValidationError` if the `value` is empty or longer than 255
    /// bytes.
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let value = value.into();
        if value.is_empty() || value.len() > u8::MAX as usize {
            return Err(ValidationError::InvalidIdentifierLength);
        }
        Ok(Self(value))
    }

    /// Generates a fresh, unique identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for RecordId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for RecordId {
    type Err = ValidationError;

    fn from_str(s: &str) -> ValidationResult<Self> {
        Self::new(s)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RecordId {
    type Error = ValidationError;

    fn try_from(value: String) -> ValidationResult<Self> {
        Self::new(value)
    }
}

/// Numeric ids, as used by the seeded demo records.
impl From<u32> for RecordId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}
