//! Request bodies and query parameters accepted by the HTTP boundary.

use super::error::ApiError;
use crate::todo::{
    domain::{TodoDomainError, TodoFilter, TodoId, TodoStatus},
    services::{CreateTodoRequest, UpdateTodoRequest},
};
use serde::Deserialize;

/// Priority given to todos created without one.
pub const DEFAULT_PRIORITY: i32 = 1;

/// Sort field applied to searches that do not name one.
pub const DEFAULT_SORT: &str = "priority";

/// JSON body for creating a todo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodoBody {
    /// Task description; required and non-blank.
    #[serde(default)]
    pub task: String,
    /// Optional priority, defaulting to [`DEFAULT_PRIORITY`].
    pub priority: Option<i32>,
}

impl CreateTodoBody {
    /// Validates the body and converts it into a service request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] when the task is missing or blank.
    pub fn into_request(self) -> Result<CreateTodoRequest, ApiError> {
        if self.task.trim().is_empty() {
            return Err(ApiError::BadRequest("task is required".to_owned()));
        }
        Ok(CreateTodoRequest::new(
            self.task,
            self.priority.unwrap_or(DEFAULT_PRIORITY),
        ))
    }
}

/// JSON body for a partial todo update.
///
/// Absent fields and empty strings both mean "keep the stored value".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoBody {
    /// Replacement task description.
    pub task: Option<String>,
    /// Replacement status text.
    pub status: Option<String>,
    /// Replacement priority; `0` is a real value.
    pub priority: Option<i32>,
}

impl UpdateTodoBody {
    /// Validates the body and converts it into a service request for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] when the task is blank or the status
    /// is unknown.
    pub fn into_request(self, id: TodoId) -> Result<UpdateTodoRequest, ApiError> {
        let mut request = UpdateTodoRequest::new(id);
        if let Some(task) = self.task.filter(|task| !task.is_empty()) {
            if task.trim().is_empty() {
                return Err(ApiError::BadRequest("task must not be blank".to_owned()));
            }
            request = request.with_task(task);
        }
        if let Some(status) = self.status.filter(|status| !status.is_empty()) {
            let parsed = TodoStatus::try_from(status.as_str()).map_err(TodoDomainError::from)?;
            request = request.with_status(parsed);
        }
        if let Some(priority) = self.priority {
            request = request.with_priority(priority);
        }
        Ok(request)
    }
}

/// Query parameters for searching todos.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchTodosQuery {
    /// Substring the task description must contain.
    #[serde(default)]
    pub task: String,
    /// Exact status to match.
    #[serde(default)]
    pub status: String,
    /// Sort field, defaulting to [`DEFAULT_SORT`].
    pub sort: Option<String>,
}

impl SearchTodosQuery {
    /// Converts the parameters into a search filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] for an unknown status or sort field.
    pub fn into_filter(self) -> Result<TodoFilter, ApiError> {
        let sort = self.sort.as_deref().unwrap_or(DEFAULT_SORT);
        Ok(TodoFilter::from_query(&self.task, &self.status, sort)?)
    }
}
