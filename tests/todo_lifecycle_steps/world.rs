//! Shared world state for todo lifecycle BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use todos::todo::{
    adapters::memory::InMemoryTodoRepository,
    domain::{PartitionedTodos, Todo},
    services::{TodoService, TodoServiceError},
};

/// Service type used by the BDD world.
pub type TestTodoService = TodoService<InMemoryTodoRepository>;

/// Scenario world for todo lifecycle behaviour tests.
pub struct TodoLifecycleWorld {
    pub service: TestTodoService,
    pub last_todo: Option<Todo>,
    pub last_error: Option<TodoServiceError>,
    pub last_search: Option<PartitionedTodos>,
}

impl TodoLifecycleWorld {
    /// Creates a world around an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: TodoService::new(Arc::new(InMemoryTodoRepository::new())),
            last_todo: None,
            last_error: None,
            last_search: None,
        }
    }

    /// Returns the todo the scenario is currently working on.
    ///
    /// # Errors
    ///
    /// Returns an error when no todo has been created yet.
    pub fn current_todo(&self) -> Result<&Todo, eyre::Report> {
        self.last_todo
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing todo in scenario world"))
    }
}

impl Default for TodoLifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TodoLifecycleWorld {
    TodoLifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
