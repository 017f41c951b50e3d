//! Todo status tag.

use super::ParseTodoStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a todo record.
///
/// The status is a plain tag: any value may be assigned to any record at any
/// time, in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    /// The todo has been recorded but not started.
    Created,
    /// Work on the todo is under way.
    Processing,
    /// The todo is complete.
    Done,
}

impl TodoStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Processing => "processing",
            Self::Done => "done",
        }
    }

    /// Returns `true` for [`TodoStatus::Done`].
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TodoStatus {
    type Error = ParseTodoStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "processing" => Ok(Self::Processing),
            "done" => Ok(Self::Done),
            _ => Err(ParseTodoStatusError(value.to_owned())),
        }
    }
}
