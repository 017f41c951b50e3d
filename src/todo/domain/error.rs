//! Error types for todo domain parsing.

use thiserror::Error;

/// Errors returned while building domain values from untrusted text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The status value is not one of `created`, `processing`, `done`.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTodoStatusError),

    /// The sort field does not name a sortable todo column.
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
}

/// Error returned while parsing todo statuses from text or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown todo status: {0}")]
pub struct ParseTodoStatusError(pub String);
