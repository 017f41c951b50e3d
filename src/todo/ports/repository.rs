//! Repository port for todo persistence and search.

use crate::todo::domain::{NewTodo, Todo, TodoFilter, TodoId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Todo persistence contract.
///
/// Implementations own identifier assignment, timestamps, and the revision
/// counter. They never apply business rules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Stores a new todo and returns it with identifier, timestamps, and
    /// revision `1` assigned.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] when the write fails.
    async fn create(&self, todo: NewTodo) -> TodoRepositoryResult<Todo>;

    /// Overwrites an existing todo if it is still at `todo.revision()`.
    ///
    /// On success the stored record is returned with its revision bumped and
    /// its update timestamp refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when the todo does not exist
    /// and [`TodoRepositoryError::RevisionMismatch`] when it was modified
    /// since it was read.
    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<Todo>;

    /// Deletes a todo by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when no row was deleted.
    async fn delete_by_id(&self, id: TodoId) -> TodoRepositoryResult<()>;

    /// Finds a todo by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::NotFound`] when the todo does not exist.
    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Todo>;

    /// Returns every todo in store-native order.
    async fn find_all(&self) -> TodoRepositoryResult<Vec<Todo>>;

    /// Returns the todos matching `filter`, sorted when the filter asks for it.
    async fn find_filtered(&self, filter: &TodoFilter) -> TodoRepositoryResult<Vec<Todo>>;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// The todo was not found.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// The todo changed after it was read, so the conditional write was
    /// rejected.
    #[error("todo {0} was modified concurrently")]
    RevisionMismatch(TodoId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
