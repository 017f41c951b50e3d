//! Application services for todo management.

mod todos;

pub use todos::{
    CreateTodoRequest, TodoService, TodoServiceError, TodoServiceResult, UpdateTodoRequest,
};
