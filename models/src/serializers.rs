// models/src/serializers.rs

//! Serde helpers shared by the domain types.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Deserializes an optional `YYYY-MM-DD` date, treating `null` and the empty
/// string the same way. Forms submit `""` for a date that was never filled in.
pub fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Deserializes a clearable field of a partial update. An absent key stays
/// `None` through `#[serde(default)]`; an explicit `null` becomes `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
