//! Port contracts for todo persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by todo services.

pub mod repository;

#[cfg(test)]
pub use repository::MockTodoRepository;
pub use repository::{TodoRepository, TodoRepositoryError, TodoRepositoryResult};
