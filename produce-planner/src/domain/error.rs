//! Record validation errors.
//!
//! A `RecordError` means one input record was malformed or out of range.
//! The record is dropped; loading carries on with the rest.

/// Validation failure for a single location, route, good or demand record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// A record named something with an empty string
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    /// A numeric field was NaN or infinite
    #[error("{field} of good {good} must be a finite number")]
    NonFinite { good: String, field: &'static str },

    /// Goods must weigh something, or capacity means nothing
    #[error("invalid weight for good {good}: {weight}")]
    NonPositiveWeight { good: String, weight: f64 },

    /// Demand quantities must be positive
    #[error("invalid demand for {good} at {destination}: {quantity}")]
    NonPositiveDemand {
        destination: String,
        good: String,
        quantity: i64,
    },

    /// Route distances must be positive
    #[error("invalid distance between {from} and {to}: {distance}")]
    NonPositiveDistance {
        from: String,
        to: String,
        distance: i64,
    },

    /// The line could not be split or parsed into the expected fields
    #[error("malformed record: {0}")]
    Malformed(String),
}
