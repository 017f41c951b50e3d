//! Diesel row models for todo persistence.

use super::schema::todos;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for todo records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Task description.
    pub task: String,
    /// Status tag.
    pub status: String,
    /// Priority.
    pub priority: i32,
    /// Revision counter.
    pub revision: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for todo records.
///
/// Identifier, revision, and timestamps come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub struct NewTodoRow {
    /// Task description.
    pub task: String,
    /// Status tag.
    pub status: String,
    /// Priority.
    pub priority: i32,
}
