//! Pricing Resolver
//!
//! Distance-tiered hourly rates and displacement costs, keyed by
//! client type.

mod resolver;
mod tables;

pub use resolver::*;
pub use tables::*;
