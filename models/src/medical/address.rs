// models/src/medical/address.rs
use serde::{Deserialize, Serialize};

/// A postal address, shared by patients and the doctor profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub city: String,
    pub state: String, // two-letter UF code, e.g. "SP"
    pub zip_code: String,
}
