//! `PostgreSQL` repository implementation for todo storage.

use super::{
    models::{NewTodoRow, TodoRow},
    schema::todos,
};
use crate::todo::{
    domain::{NewTodo, PersistedTodoData, Todo, TodoFilter, TodoId, TodoSortField, TodoStatus},
    ports::{TodoRepository, TodoRepositoryError, TodoRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by todo adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL for the `todos` table.
///
/// `down.sql` next to it drops the table again. Nothing in the service runs
/// it; it exists for manual rollback and for tests that rebuild the schema.
pub const SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-16-000000_create_todos/up.sql");

/// `PostgreSQL`-backed todo repository.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: TodoPgPool,
}

impl PostgresTodoRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TodoPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `todos` table and its indexes when they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> TodoRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SCHEMA_SQL)
                .map_err(TodoRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TodoRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TodoRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TodoRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TodoRepositoryError::persistence)?
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn create(&self, todo: NewTodo) -> TodoRepositoryResult<Todo> {
        let new_row = NewTodoRow {
            task: todo.task().to_owned(),
            status: todo.status().as_str().to_owned(),
            priority: todo.priority(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(todos::table)
                .values(&new_row)
                .returning(TodoRow::as_returning())
                .get_result::<TodoRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            row_to_todo(row)
        })
        .await
    }

    async fn update(&self, todo: &Todo) -> TodoRepositoryResult<Todo> {
        let id = todo.id();
        let expected_revision = todo.revision();
        let task = todo.task().to_owned();
        let status = todo.status().as_str();
        let priority = todo.priority();

        self.run_blocking(move |connection| {
            let row = diesel::update(
                todos::table
                    .filter(todos::id.eq(id.value()))
                    .filter(todos::revision.eq(expected_revision)),
            )
            .set((
                todos::task.eq(&task),
                todos::status.eq(status),
                todos::priority.eq(priority),
                todos::revision.eq(todos::revision + 1),
                todos::updated_at.eq(diesel::dsl::now),
            ))
            .returning(TodoRow::as_returning())
            .get_result::<TodoRow>(connection)
            .optional()
            .map_err(TodoRepositoryError::persistence)?;

            match row {
                Some(updated) => row_to_todo(updated),
                None => Err(classify_rejected_update(connection, id)),
            }
        })
        .await
    }

    async fn delete_by_id(&self, id: TodoId) -> TodoRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(todos::table.filter(todos::id.eq(id.value())))
                .execute(connection)
                .map_err(TodoRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TodoRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TodoId) -> TodoRepositoryResult<Todo> {
        self.run_blocking(move |connection| {
            let row = todos::table
                .filter(todos::id.eq(id.value()))
                .select(TodoRow::as_select())
                .first::<TodoRow>(connection)
                .optional()
                .map_err(TodoRepositoryError::persistence)?;
            match row {
                Some(found) => row_to_todo(found),
                None => Err(TodoRepositoryError::NotFound(id)),
            }
        })
        .await
    }

    async fn find_all(&self) -> TodoRepositoryResult<Vec<Todo>> {
        self.run_blocking(move |connection| {
            let rows = todos::table
                .select(TodoRow::as_select())
                .order(todos::id.asc())
                .load::<TodoRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_todo).collect()
        })
        .await
    }

    async fn find_filtered(&self, filter: &TodoFilter) -> TodoRepositoryResult<Vec<Todo>> {
        let lookup_filter = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = todos::table.select(TodoRow::as_select()).into_boxed::<Pg>();
            if let Some(needle) = lookup_filter.task_contains() {
                query = query.filter(todos::task.like(like_pattern(needle)).escape('\\'));
            }
            if let Some(status) = lookup_filter.status() {
                query = query.filter(todos::status.eq(status.as_str()));
            }
            // Ties fall back to id order, matching the in-memory store.
            query = match lookup_filter.sort_by() {
                Some(TodoSortField::Task) => query.order(todos::task.asc()),
                Some(TodoSortField::Status) => query.order(todos::status.asc()),
                Some(TodoSortField::Priority) => query.order(todos::priority.asc()),
                Some(TodoSortField::CreatedAt) => query.order(todos::created_at.asc()),
                Some(TodoSortField::UpdatedAt) => query.order(todos::updated_at.asc()),
                Some(TodoSortField::Id) | None => query,
            };
            query = query.then_order_by(todos::id.asc());

            let rows = query
                .load::<TodoRow>(connection)
                .map_err(TodoRepositoryError::persistence)?;
            rows.into_iter().map(row_to_todo).collect()
        })
        .await
    }
}

fn row_to_todo(row: TodoRow) -> TodoRepositoryResult<Todo> {
    let TodoRow {
        id,
        task,
        status: persisted_status,
        priority,
        revision,
        created_at,
        updated_at,
    } = row;

    let status =
        TodoStatus::try_from(persisted_status.as_str()).map_err(TodoRepositoryError::persistence)?;

    Ok(Todo::from_persisted(PersistedTodoData {
        id: TodoId::new(id),
        task,
        status,
        priority,
        revision,
        created_at,
        updated_at,
    }))
}

/// Works out why a conditional update matched no row.
fn classify_rejected_update(connection: &mut PgConnection, id: TodoId) -> TodoRepositoryError {
    let still_exists = diesel::select(diesel::dsl::exists(
        todos::table.filter(todos::id.eq(id.value())),
    ))
    .get_result::<bool>(connection);

    match still_exists {
        Ok(true) => TodoRepositoryError::RevisionMismatch(id),
        Ok(false) => TodoRepositoryError::NotFound(id),
        Err(err) => TodoRepositoryError::persistence(err),
    }
}

/// Wraps `needle` for a `LIKE ... ESCAPE '\'` substring match, escaping the
/// wildcard characters so they match literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
