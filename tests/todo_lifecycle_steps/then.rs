//! Then steps for todo lifecycle BDD scenarios.

use super::world::{TodoLifecycleWorld, run_async};
use rstest_bdd_macros::then;
use todos::todo::{
    domain::{PartitionedTodos, Todo, TodoStatus},
    services::TodoServiceError,
};

fn search_result(world: &TodoLifecycleWorld) -> Result<&PartitionedTodos, eyre::Report> {
    world
        .last_search
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing search result"))
}

fn single_task(group: &[Todo], expected: &str) -> Result<(), eyre::Report> {
    match group {
        [only] if only.task() == expected => Ok(()),
        _ => {
            let tasks: Vec<&str> = group.iter().map(Todo::task).collect();
            Err(eyre::eyre!("expected only {expected:?}, found {tasks:?}"))
        }
    }
}

#[then(r#"the todo has task "{task}", status "{status}" and priority {priority:i32}"#)]
fn todo_has_values(
    world: &TodoLifecycleWorld,
    task: String,
    status: String,
    priority: i32,
) -> Result<(), eyre::Report> {
    let expected_status = TodoStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let todo = world.current_todo()?;

    if todo.task() != task || todo.status() != expected_status || todo.priority() != priority {
        return Err(eyre::eyre!(
            "expected ({task}, {expected_status}, {priority}), found ({}, {}, {})",
            todo.task(),
            todo.status(),
            todo.priority()
        ));
    }
    Ok(())
}

#[then("looking the todo up returns the same values")]
fn lookup_matches(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let todo = world.current_todo()?;
    let fetched = run_async(world.service.find(todo.id()))
        .map_err(|err| eyre::eyre!("lookup failed: {err}"))?;
    if &fetched != todo {
        return Err(eyre::eyre!("expected {todo:?}, found {fetched:?}"));
    }
    Ok(())
}

#[then("looking the todo up fails with not found")]
fn lookup_fails(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let todo = world.current_todo()?;
    let result = run_async(world.service.find(todo.id()));
    if !matches!(result, Err(TodoServiceError::NotFound(_))) {
        return Err(eyre::eyre!("expected NotFound error, got {result:?}"));
    }
    Ok(())
}

#[then("the operation fails with not found")]
fn operation_not_found(world: &TodoLifecycleWorld) -> Result<(), eyre::Report> {
    match &world.last_error {
        Some(TodoServiceError::NotFound(_)) => Ok(()),
        other => Err(eyre::eyre!("expected NotFound error, got {other:?}")),
    }
}

#[then(r#"the completed tasks are "{task}""#)]
fn completed_tasks_are(world: &TodoLifecycleWorld, task: String) -> Result<(), eyre::Report> {
    single_task(search_result(world)?.completed_tasks(), &task)
}

#[then(r#"the incomplete tasks are "{task}""#)]
fn incomplete_tasks_are(world: &TodoLifecycleWorld, task: String) -> Result<(), eyre::Report> {
    single_task(search_result(world)?.incomplete_tasks(), &task)
}
