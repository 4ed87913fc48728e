//! Domain models for the order review workflow

pub mod km_option;
pub mod line_items;
pub mod reference;
pub mod service_order;

pub use km_option::KmOption;
pub use line_items::{AdditionalService, Displacement, Material, Worklog};
pub use reference::{Company, Machine, Vehicle};
pub use service_order::{OrderDetail, ReviewStatus, ServiceOrder};
