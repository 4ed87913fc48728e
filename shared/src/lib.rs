//! Shared types for the order review workspace
//!
//! Domain models, wire DTOs and lenient input parsing used by both
//! `review-core` and `review-client`.

pub mod models;
pub mod response;
pub mod review;
pub mod util;

// Re-exports
pub use models::{
    AdditionalService, Company, Displacement, KmOption, Machine, Material, OrderDetail,
    ReviewStatus, ServiceOrder, Vehicle, Worklog,
};
pub use review::{OrderSummary, ReasonRequest, ReviewList, ReviewPayload, ReviewStats};
pub use serde::{Deserialize, Serialize};
