//! Search filter for todo lookups.

use super::{TodoDomainError, TodoStatus};

/// Column a filtered search may be sorted by, always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TodoSortField {
    /// Sort by identifier.
    Id,
    /// Sort by task description.
    Task,
    /// Sort by status text.
    Status,
    /// Sort by priority.
    Priority,
    /// Sort by creation timestamp.
    CreatedAt,
    /// Sort by latest update timestamp.
    UpdatedAt,
}

impl TodoSortField {
    /// Returns the storage column name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Task => "task",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl TryFrom<&str> for TodoSortField {
    type Error = TodoDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "id" => Ok(Self::Id),
            "task" => Ok(Self::Task),
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            "created_at" | "createdAt" => Ok(Self::CreatedAt),
            "updated_at" | "updatedAt" => Ok(Self::UpdatedAt),
            _ => Err(TodoDomainError::UnknownSortField(value.to_owned())),
        }
    }
}

/// Criteria for a filtered todo search.
///
/// Each criterion is optional; an empty filter matches every todo in the
/// store's native order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    task_contains: Option<String>,
    status: Option<TodoStatus>,
    sort_by: Option<TodoSortField>,
}

impl TodoFilter {
    /// Creates a filter that matches everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a filter from raw query text.
    ///
    /// Empty strings leave the matching criterion unset.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidStatus`] for an unknown status and
    /// [`TodoDomainError::UnknownSortField`] for an unknown sort column.
    pub fn from_query(task: &str, status: &str, sort_by: &str) -> Result<Self, TodoDomainError> {
        let mut filter = Self::new();
        if !task.is_empty() {
            filter = filter.with_task_containing(task);
        }
        if !status.trim().is_empty() {
            filter = filter.with_status(TodoStatus::try_from(status)?);
        }
        if !sort_by.trim().is_empty() {
            filter = filter.sorted_by(TodoSortField::try_from(sort_by)?);
        }
        Ok(filter)
    }

    /// Restricts results to todos whose task contains `needle`.
    #[must_use]
    pub fn with_task_containing(mut self, needle: impl Into<String>) -> Self {
        self.task_contains = Some(needle.into());
        self
    }

    /// Restricts results to todos with exactly `status`.
    #[must_use]
    pub const fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sorts results ascending by `field`.
    #[must_use]
    pub const fn sorted_by(mut self, field: TodoSortField) -> Self {
        self.sort_by = Some(field);
        self
    }

    /// Returns the task substring criterion, if any.
    #[must_use]
    pub fn task_contains(&self) -> Option<&str> {
        self.task_contains.as_deref()
    }

    /// Returns the status criterion, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TodoStatus> {
        self.status
    }

    /// Returns the sort field, if any.
    #[must_use]
    pub const fn sort_by(&self) -> Option<TodoSortField> {
        self.sort_by
    }
}
