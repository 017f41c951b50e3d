//! In-memory repository for todo records.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::todo::{
    domain::{NewTodo, PersistedTodoData, Todo, TodoFilter, TodoId, TodoSortField},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};

/// Thread-safe in-memory todo repository.
///
/// Todos are kept in identifier order, which is the native order returned by
/// unsorted lookups. Identifiers are never reused after a delete.
pub struct InMemoryTodoRepository<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryTodoState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTodoState {
    todos: BTreeMap<TodoId, Todo>,
    last_id: i64,
}

impl InMemoryTodoRepository<DefaultClock> {
    /// Creates an empty repository stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTodoRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InMemoryTodoRepository<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryTodoRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository stamped by `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTodoState::default())),
            clock,
        }
    }

    fn read_state(&self) -> TodoRepositoryResult<RwLockReadGuard<'_, InMemoryTodoState>> {
        self.state.read().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TodoRepositoryResult<RwLockWriteGuard<'_, InMemoryTodoState>> {
        self.state.write().map_err(|err| {
            TodoRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn matches_filter(todo: &Todo, filter: &TodoFilter) -> bool {
    let task_matches = filter
        .task_contains()
        .is_none_or(|needle| todo.task().contains(needle));
    let status_matches = filter.status().is_none_or(|status| todo.status() == status);
    task_matches && status_matches
}

fn compare_by(field: TodoSortField, left: &Todo, right: &Todo) -> Ordering {
    match field {
        TodoSortField::Id => left.id().cmp(&right.id()),
        TodoSortField::Task => left.task().cmp(right.task()),
        TodoSortField::Status => left.status().as_str().cmp(right.status().as_str()),
        TodoSortField::Priority => left.priority().cmp(&right.priority()),
        TodoSortField::CreatedAt => left.created_at().cmp(&right.created_at()),
        TodoSortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
    }
}

#[async_trait]
impl<C> TodoRepository for InMemoryTodoRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn create(&self, todo: NewTodo) -> TodoRepositoryResult<Todo> {
        let timestamp = self.clock.utc();
        let mut state = self.write_state()?;
        let id = TodoId::new(state.last_id + 1);

        let stored = Todo::from_persisted(PersistedTodoData {
            id,
            task: todo.task().to_owned(),
            status: todo.status(),
            priority: todo.priority(),
            revision: 1,
            created_at: timestamp,
            updated_at: timestamp,
        });
        state.last_id = id.value();
        state.todos.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<Todo> {
        let timestamp = self.clock.utc();
        let mut state = self.write_state()?;

        let current = state
            .todos
            .get(&todo.id())
            .ok_or(TodoRepositoryError::NotFound(todo.id()))?;
        if current.revision() != todo.revision() {
            return Err(TodoRepositoryError::RevisionMismatch(todo.id()));
        }

        let stored = Todo::from_persisted(PersistedTodoData {
            id: todo.id(),
            task: todo.task().to_owned(),
            status: todo.status(),
            priority: todo.priority(),
            revision: current.revision() + 1,
            created_at: current.created_at(),
            updated_at: timestamp,
        });
        state.todos.insert(todo.id(), stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: TodoId) -> TodoRepositoryResult<()> {
        let mut state = self.write_state()?;
        state
            .todos
            .remove(&id)
            .map(|_| ())
            .ok_or(TodoRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Todo> {
        let state = self.read_state()?;
        state
            .todos
            .get(&id)
            .cloned()
            .ok_or(TodoRepositoryError::NotFound(id))
    }

    async fn find_all(&self) -> TodoRepositoryResult<Vec<Todo>> {
        let state = self.read_state()?;
        Ok(state.todos.values().cloned().collect())
    }

    async fn find_filtered(&self, filter: &TodoFilter) -> TodoRepositoryResult<Vec<Todo>> {
        let state = self.read_state()?;
        let mut todos: Vec<Todo> = state
            .todos
            .values()
            .filter(|todo| matches_filter(todo, filter))
            .cloned()
            .collect();
        if let Some(field) = filter.sort_by() {
            todos.sort_by(|left, right| compare_by(field, left, right));
        }
        Ok(todos)
    }
}
