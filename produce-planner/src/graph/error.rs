//! Graph mutation errors.

/// Errors from mutating a `LocationGraph`.
///
/// Queries never fail: an unknown or disconnected location is simply
/// unreachable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A route referenced a location that was never registered
    #[error("unknown location: {0}")]
    UnknownLocation(String),

    /// Routes must have a positive distance
    #[error("route between {from} and {to} must have a positive distance")]
    ZeroDistance { from: String, to: String },
}
