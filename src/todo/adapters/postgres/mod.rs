//! `PostgreSQL` adapters for todo persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTodoRepository, SCHEMA_SQL, TodoPgPool};
