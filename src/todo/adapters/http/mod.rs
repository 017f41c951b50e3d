//! HTTP request boundary for the todo service.
//!
//! Handlers parse and validate transport input, call [`TodoService`], and
//! render `{"data": ...}` or `{"errors": [...]}` envelopes. No business rules
//! live here.

mod error;
mod handlers;
mod requests;
mod response;

pub use error::{ApiError, ApiResult};
pub use requests::{CreateTodoBody, DEFAULT_PRIORITY, DEFAULT_SORT, SearchTodosQuery, UpdateTodoBody};
pub use response::{DataEnvelope, ErrorEntry, ErrorEnvelope};

use crate::todo::{ports::TodoRepository, services::TodoService};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

/// Builds the todo API router around `service`.
#[must_use]
pub fn router<R>(service: TodoService<R>) -> Router
where
    R: TodoRepository + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/todos",
            get(handlers::search_todos::<R>).post(handlers::create_todo::<R>),
        )
        .route(
            "/api/v1/todos/{id}",
            get(handlers::find_todo::<R>)
                .put(handlers::update_todo::<R>)
                .delete(handlers::delete_todo::<R>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
