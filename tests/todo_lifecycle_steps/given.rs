//! Given steps for todo lifecycle BDD scenarios.

use super::world::{TodoLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use todos::todo::{
    domain::TodoStatus,
    services::{CreateTodoRequest, UpdateTodoRequest},
};

#[given("an empty todo list")]
fn empty_todo_list(world: &mut TodoLifecycleWorld) -> Result<(), eyre::Report> {
    let existing = run_async(world.service.find_all()).wrap_err("list todos")?;
    if !existing.is_empty() {
        return Err(eyre::eyre!("expected no todos, found {}", existing.len()));
    }
    Ok(())
}

#[given(r#"a todo "{task}" with priority {priority:i32}"#)]
fn todo_with_priority(
    world: &mut TodoLifecycleWorld,
    task: String,
    priority: i32,
) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create(CreateTodoRequest::new(task, priority)))
        .wrap_err("create todo for scenario")?;
    world.last_todo = Some(created);
    Ok(())
}

#[given(r#"a todo "{task}" with status "{status}""#)]
fn todo_with_status(
    world: &mut TodoLifecycleWorld,
    task: String,
    status: String,
) -> Result<(), eyre::Report> {
    let target = TodoStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let created = run_async(world.service.create(CreateTodoRequest::new(task, 1)))
        .wrap_err("create todo for scenario")?;
    let updated = run_async(
        world
            .service
            .update(UpdateTodoRequest::new(created.id()).with_status(target)),
    )
    .wrap_err("set scenario todo status")?;
    world.last_todo = Some(updated);
    Ok(())
}
