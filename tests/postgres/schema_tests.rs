//! Schema bootstrap and rollback against a real database.

use super::helpers::{BoxError, DROP_SCHEMA_SQL, PostgresContext, postgres_context};
use rstest::rstest;
use todos::todo::{domain::NewTodo, ports::TodoRepository};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ensure_schema_keeps_existing_rows(
    postgres_context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = postgres_context?;
    ctx.seed(&[("kept", 1)]).await?;

    ctx.repository.ensure_schema().await?;
    ctx.repository.ensure_schema().await?;

    assert_eq!(ctx.repository.find_all().await?.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ensure_schema_rebuilds_after_rollback(
    postgres_context: Result<PostgresContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = postgres_context?;
    ctx.seed(&[("gone", 1)]).await?;

    ctx.execute_sql(DROP_SCHEMA_SQL)?;
    assert!(ctx.repository.find_all().await.is_err());

    ctx.repository.ensure_schema().await?;
    let created = ctx.repository.create(NewTodo::new("fresh", 2)).await?;

    assert_eq!(ctx.repository.find_all().await?, vec![created]);
    Ok(())
}
