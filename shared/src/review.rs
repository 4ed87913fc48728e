//! Review API DTOs
//!
//! Request/response types exchanged with the review backend.
//! Shared between review-core (which builds payloads) and
//! review-client (which sends them).

use crate::models::{AdditionalService, Displacement, Material, ReviewStatus, Worklog};
use crate::util::{lenient_datetime, lenient_decimal};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Lists and stats
// =============================================================================

/// The three order lists of the review screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewList {
    Pending,
    Standby,
    Archived,
}

impl ReviewList {
    pub const ALL: [ReviewList; 3] = [ReviewList::Pending, ReviewList::Standby, ReviewList::Archived];

    /// Path segment under `/review/`
    pub fn path(&self) -> &'static str {
        match self {
            ReviewList::Pending => "pending",
            ReviewList::Standby => "standby",
            ReviewList::Archived => "archived",
        }
    }

    /// Status of the orders the list holds
    pub fn status(&self) -> ReviewStatus {
        match self {
            ReviewList::Pending => ReviewStatus::PendingReview,
            ReviewList::Standby => ReviewStatus::Standby,
            ReviewList::Archived => ReviewStatus::Cancelled,
        }
    }
}

/// Row of an order list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderSummary {
    pub id: i64,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub machine_name: Option<String>,
    #[serde(default)]
    pub technician_name: Option<String>,
    #[serde(default, with = "lenient_datetime")]
    pub finished_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub status: ReviewStatus,
    #[serde(
        default,
        serialize_with = "lenient_decimal::serialize_option",
        deserialize_with = "lenient_decimal::deserialize_option"
    )]
    pub grand_total: Option<Decimal>,
    /// Standby or cancellation reason
    #[serde(default)]
    pub reason: Option<String>,
}

/// `GET /review/stats/summary`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ReviewStats {
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub standby: u64,
    #[serde(default)]
    pub approved: u64,
    #[serde(default)]
    pub archived: u64,
}

// =============================================================================
// Transition bodies
// =============================================================================

/// Body of `POST /review/{id}/approve` and `POST /review/{id}/save`
///
/// `observations` is only sent with drafts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewPayload {
    pub company_id: Option<i64>,
    pub machine_id: Option<i64>,
    pub maintenance_type: String,
    pub service_description: String,
    pub is_new_client: bool,
    #[serde(with = "lenient_decimal")]
    pub effective_hourly_rate: Decimal,
    /// Sum of additional services
    #[serde(with = "lenient_decimal")]
    pub value_service: Decimal,
    /// Labour plus displacement
    #[serde(with = "lenient_decimal")]
    pub total_service_cost: Decimal,
    #[serde(with = "lenient_decimal")]
    pub total_material_cost: Decimal,
    #[serde(with = "lenient_decimal")]
    pub grand_total: Decimal,
    /// Billable hours
    #[serde(with = "lenient_decimal")]
    pub total_hours: Decimal,
    pub materials: Vec<Material>,
    pub worklogs: Vec<Worklog>,
    pub displacements: Vec<Displacement>,
    pub additional_services: Vec<AdditionalService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

/// Body of `POST /review/{id}/standby` and `POST /review/{id}/archive`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReasonRequest {
    pub reason: String,
}
