//! Review engine error types

use crate::validation::Violation;
use rust_decimal::Decimal;
use shared::ReviewStatus;
use thiserror::Error;

/// Review engine errors
///
/// None of these are fatal: the caller keeps its session and can retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReviewError {
    /// Pre-approval checks failed; every violation is listed
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    #[error("Cannot {action} an order in {from} status")]
    InvalidTransition {
        from: ReviewStatus,
        action: &'static str,
    },

    #[error("A reason is required to {0}")]
    MissingReason(&'static str),

    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Hourly rate must be non-negative, got {0}")]
    NegativeRate(Decimal),

    #[error("Hourly rate exceeds maximum allowed ({max}), got {value}")]
    RateTooHigh { value: Decimal, max: Decimal },

    #[error("No order is open for review")]
    NoOpenOrder,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for review engine operations
pub type ReviewResult<T> = Result<T, ReviewError>;
