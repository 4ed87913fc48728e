//! Service order under financial review

use super::{AdditionalService, Displacement, Material, Worklog};
use crate::util::{lenient_datetime, lenient_decimal};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an order inside the review subsystem
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Waiting for review (initial)
    #[default]
    #[serde(alias = "pending")]
    PendingReview,
    /// On hold for an external blocker
    Standby,
    /// Approved for invoicing (terminal)
    #[serde(alias = "completed")]
    Approved,
    /// Cancelled/archived, restorable
    #[serde(alias = "archived")]
    Cancelled,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::PendingReview => "pending_review",
            ReviewStatus::Standby => "standby",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order header as held while editing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ServiceOrder {
    pub id: i64,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub machine_id: Option<i64>,
    #[serde(default)]
    pub machine_name: Option<String>,
    #[serde(default)]
    pub technician_id: Option<i64>,
    #[serde(default)]
    pub technician_name: Option<String>,
    #[serde(default)]
    pub is_new_client: bool,
    #[serde(default)]
    pub maintenance_type: String,
    #[serde(default)]
    pub service_description: String,
    #[serde(default)]
    pub observations: String,
    #[serde(default, with = "lenient_datetime")]
    pub finished_at: Option<NaiveDateTime>,
    #[serde(
        default,
        serialize_with = "lenient_decimal::serialize_option",
        deserialize_with = "lenient_decimal::deserialize_option"
    )]
    pub effective_hourly_rate: Option<Decimal>,
    #[serde(default)]
    pub status: ReviewStatus,
}

/// Full order detail as returned by `GET /review/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: ServiceOrder,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub worklogs: Vec<Worklog>,
    #[serde(default)]
    pub displacements: Vec<Displacement>,
    #[serde(default)]
    pub additional_services: Vec<AdditionalService>,
}
