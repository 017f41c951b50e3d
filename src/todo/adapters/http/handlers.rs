//! Axum handlers for the todo routes.

use super::{
    error::{ApiError, ApiResult},
    requests::{CreateTodoBody, SearchTodosQuery, UpdateTodoBody},
    response::DataEnvelope,
};
use crate::todo::{
    domain::{PartitionedTodos, Todo, TodoId},
    ports::TodoRepository,
    services::TodoService,
};
use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{BytesRejection, JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

fn todo_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<TodoId> {
    let Path(raw) = path.map_err(ApiError::from)?;
    Ok(TodoId::new(raw))
}

/// `POST /api/v1/todos`
pub async fn create_todo<R>(
    State(service): State<TodoService<R>>,
    body: Result<Json<CreateTodoBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataEnvelope<Todo>>)>
where
    R: TodoRepository + 'static,
{
    let Json(payload) = body?;
    let todo = service.create(payload.into_request()?).await?;
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(todo))))
}

/// `GET /api/v1/todos`
pub async fn search_todos<R>(
    State(service): State<TodoService<R>>,
    query: Result<Query<SearchTodosQuery>, QueryRejection>,
) -> ApiResult<Json<DataEnvelope<PartitionedTodos>>>
where
    R: TodoRepository + 'static,
{
    let Query(params) = query?;
    let filter = params.into_filter()?;
    let partitioned = service.find_all_filtered(&filter).await?;
    Ok(Json(DataEnvelope::new(partitioned)))
}

/// `GET /api/v1/todos/{id}`
pub async fn find_todo<R>(
    State(service): State<TodoService<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<DataEnvelope<Todo>>>
where
    R: TodoRepository + 'static,
{
    let todo = service.find(todo_id(path)?).await?;
    Ok(Json(DataEnvelope::new(todo)))
}

/// Parses an update body, treating a missing or blank body as "change
/// nothing".
fn update_body(body: Result<Bytes, BytesRejection>) -> ApiResult<UpdateTodoBody> {
    let raw = body?;
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(UpdateTodoBody::default());
    }
    let Json(payload) = Json::<UpdateTodoBody>::from_bytes(&raw)?;
    Ok(payload)
}

/// `PUT /api/v1/todos/{id}`
pub async fn update_todo<R>(
    State(service): State<TodoService<R>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<DataEnvelope<Todo>>>
where
    R: TodoRepository + 'static,
{
    let id = todo_id(path)?;
    let payload = update_body(body)?;
    let todo = service.update(payload.into_request(id)?).await?;
    Ok(Json(DataEnvelope::new(todo)))
}

/// `DELETE /api/v1/todos/{id}`
pub async fn delete_todo<R>(
    State(service): State<TodoService<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode>
where
    R: TodoRepository + 'static,
{
    service.delete(todo_id(path)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
