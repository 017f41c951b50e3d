//! Todo record and related construction types.

use super::{TodoId, TodoStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted todo record.
///
/// Identity, timestamps, and the revision counter are owned by the store;
/// the only mutation available to callers is [`Todo::apply_changes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    id: TodoId,
    task: String,
    status: TodoStatus,
    priority: i32,
    #[serde(skip)]
    revision: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoData {
    /// Persisted identifier.
    pub id: TodoId,
    /// Persisted task description.
    pub task: String,
    /// Persisted status.
    pub status: TodoStatus,
    /// Persisted priority.
    pub priority: i32,
    /// Persisted revision counter used for conditional writes.
    pub revision: i64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Reconstructs a todo from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTodoData) -> Self {
        Self {
            id: data.id,
            task: data.task,
            status: data.status,
            priority: data.priority,
            revision: data.revision,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the todo identifier.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the task description.
    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TodoStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the revision the record was read at.
    #[must_use]
    pub const fn revision(&self) -> i64 {
        self.revision
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrites every field supplied in `changes` and keeps the others.
    pub fn apply_changes(&mut self, changes: TodoChanges) {
        let TodoChanges {
            task,
            status,
            priority,
        } = changes;
        if let Some(task) = task {
            self.task = task;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
    }
}

/// A todo that has not been stored yet.
///
/// New todos always start in [`TodoStatus::Created`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    task: String,
    priority: i32,
}

impl NewTodo {
    /// Creates an unsaved todo.
    #[must_use]
    pub fn new(task: impl Into<String>, priority: i32) -> Self {
        Self {
            task: task.into(),
            priority,
        }
    }

    /// Returns the task description.
    #[must_use]
    pub fn task(&self) -> &str {
        &self.task
    }

    /// Returns the initial status, which is always `created`.
    #[must_use]
    pub const fn status(&self) -> TodoStatus {
        TodoStatus::Created
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }
}

/// Partial set of field replacements for an existing todo.
///
/// `None` means "not provided", so a priority of `0` can be set explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    task: Option<String>,
    status: Option<TodoStatus>,
    priority: Option<i32>,
}

impl TodoChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the task description.
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Search results split by completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionedTodos {
    incomplete_tasks: Vec<Todo>,
    completed_tasks: Vec<Todo>,
}

impl PartitionedTodos {
    /// Splits todos into incomplete and completed groups.
    ///
    /// Every `done` todo lands in the completed group and everything else in
    /// the incomplete group. Input order is kept inside each group.
    #[must_use]
    pub fn from_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        let (completed_tasks, incomplete_tasks) = todos
            .into_iter()
            .partition(|todo| todo.status().is_done());
        Self {
            incomplete_tasks,
            completed_tasks,
        }
    }

    /// Returns todos whose status is not `done`.
    #[must_use]
    pub fn incomplete_tasks(&self) -> &[Todo] {
        &self.incomplete_tasks
    }

    /// Returns todos whose status is `done`.
    #[must_use]
    pub fn completed_tasks(&self) -> &[Todo] {
        &self.completed_tasks
    }

    /// Returns the `(incomplete, completed)` groups by value.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Todo>, Vec<Todo>) {
        (self.incomplete_tasks, self.completed_tasks)
    }
}
