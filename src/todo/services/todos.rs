//! Service layer for todo creation, partial updates, and partitioned search.

use crate::todo::{
    domain::{NewTodo, PartitionedTodos, Todo, TodoChanges, TodoFilter, TodoId, TodoStatus},
    ports::{TodoRepository, TodoRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Number of read-merge-write rounds an update gets before giving up on a
/// record that keeps changing underneath it.
const MAX_UPDATE_ATTEMPTS: usize = 3;

/// Request payload for creating a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoRequest {
    task: String,
    priority: i32,
}

impl CreateTodoRequest {
    /// Creates a request with the task description and priority.
    #[must_use]
    pub fn new(task: impl Into<String>, priority: i32) -> Self {
        Self {
            task: task.into(),
            priority,
        }
    }
}

/// Request payload for a partial todo update.
///
/// Fields left unset keep their stored values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTodoRequest {
    id: TodoId,
    changes: TodoChanges,
}

impl UpdateTodoRequest {
    /// Creates a request that changes nothing yet.
    #[must_use]
    pub fn new(id: TodoId) -> Self {
        Self {
            id,
            changes: TodoChanges::new(),
        }
    }

    /// Sets a replacement task description.
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.changes = self.changes.with_task(task);
        self
    }

    /// Sets a replacement status.
    #[must_use]
    pub fn with_status(mut self, status: TodoStatus) -> Self {
        self.changes = self.changes.with_status(status);
        self
    }

    /// Sets a replacement priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.changes = self.changes.with_priority(priority);
        self
    }
}

/// Service-level errors for todo operations.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// No todo exists with the requested identifier.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// The todo kept changing while an update was being applied.
    #[error("todo {0} was modified concurrently, update abandoned")]
    Conflict(TodoId),

    /// Any other repository failure.
    #[error(transparent)]
    Storage(TodoRepositoryError),
}

impl From<TodoRepositoryError> for TodoServiceError {
    fn from(err: TodoRepositoryError) -> Self {
        match err {
            TodoRepositoryError::NotFound(id) => Self::NotFound(id),
            TodoRepositoryError::RevisionMismatch(id) => Self::Conflict(id),
            TodoRepositoryError::Persistence(_) => Self::Storage(err),
        }
    }
}

/// Result type for todo service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Todo orchestration service.
pub struct TodoService<R>
where
    R: TodoRepository,
{
    repository: Arc<R>,
}

impl<R> Clone for TodoService<R>
where
    R: TodoRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R> TodoService<R>
where
    R: TodoRepository,
{
    /// Creates a new todo service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a todo in the `created` status.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Storage`] when the repository rejects the
    /// write.
    #[instrument(skip_all, fields(priority = request.priority))]
    pub async fn create(&self, request: CreateTodoRequest) -> TodoServiceResult<Todo> {
        let CreateTodoRequest { task, priority } = request;
        let todo = self
            .repository
            .create(NewTodo::new(task, priority))
            .await?;
        info!(todo_id = %todo.id(), "created todo");
        Ok(todo)
    }

    /// Applies a partial update and returns the stored result.
    ///
    /// The write is conditional on the revision that was read, so a
    /// concurrent change is never silently overwritten. On a revision
    /// mismatch the todo is read and merged again.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] when the todo does not exist,
    /// [`TodoServiceError::Conflict`] when every attempt lost a race, and
    /// [`TodoServiceError::Storage`] for other repository failures.
    #[instrument(skip_all, fields(todo_id = %request.id))]
    pub async fn update(&self, request: UpdateTodoRequest) -> TodoServiceResult<Todo> {
        let UpdateTodoRequest { id, changes } = request;
        let mut attempt = 1;
        loop {
            let mut todo = self.find(id).await?;
            todo.apply_changes(changes.clone());
            match self.repository.update(&todo).await {
                Ok(stored) => {
                    info!(todo_id = %id, revision = stored.revision(), "updated todo");
                    return Ok(stored);
                }
                Err(TodoRepositoryError::RevisionMismatch(_)) if attempt < MAX_UPDATE_ATTEMPTS => {
                    warn!(todo_id = %id, attempt, "todo changed during update, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Deletes a todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] when nothing was deleted and
    /// [`TodoServiceError::Storage`] for other repository failures.
    #[instrument(skip_all, fields(todo_id = %id))]
    pub async fn delete(&self, id: TodoId) -> TodoServiceResult<()> {
        self.repository.delete_by_id(id).await?;
        info!(todo_id = %id, "deleted todo");
        Ok(())
    }

    /// Finds a todo by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] when the todo does not exist and
    /// [`TodoServiceError::Storage`] for other repository failures.
    pub async fn find(&self, id: TodoId) -> TodoServiceResult<Todo> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Returns every todo in store-native order.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Storage`] when the lookup fails.
    pub async fn find_all(&self) -> TodoServiceResult<Vec<Todo>> {
        Ok(self.repository.find_all().await?)
    }

    /// Searches todos and splits the matches into incomplete and completed
    /// groups.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Storage`] when the query fails.
    #[instrument(skip_all)]
    pub async fn find_all_filtered(
        &self,
        filter: &TodoFilter,
    ) -> TodoServiceResult<PartitionedTodos> {
        let todos = self.repository.find_filtered(filter).await?;
        Ok(PartitionedTodos::from_todos(todos))
    }
}
