//! Response envelopes rendered by the HTTP boundary.

use serde::Serialize;

/// Success envelope wrapping the returned entity or collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataEnvelope<T> {
    /// Response payload.
    pub data: T,
}

impl<T> DataEnvelope<T> {
    /// Wraps `data` in a success envelope.
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { data }
    }
}

/// Failure envelope carrying one entry per error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    /// Reported errors.
    pub errors: Vec<ErrorEntry>,
}

/// Single reported error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    /// Stable machine-readable error code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}
