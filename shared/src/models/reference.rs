//! Reference data for selection lists
//!
//! Fetched once per review session and treated as read-only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Machine {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// Owning company, when the backend reports it
    #[serde(default)]
    pub company_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub plate: Option<String>,
}
