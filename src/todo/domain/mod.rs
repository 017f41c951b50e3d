//! Domain model for todo records.
//!
//! The todo domain covers record construction, the status tag, search
//! filters, and the completed/incomplete split of search results. Storage and
//! transport concerns stay outside of this boundary.

mod error;
mod filter;
mod ids;
mod status;
mod todo;

pub use error::{ParseTodoStatusError, TodoDomainError};
pub use filter::{TodoFilter, TodoSortField};
pub use ids::TodoId;
pub use status::TodoStatus;
pub use todo::{NewTodo, PartitionedTodos, PersistedTodoData, Todo, TodoChanges};
