//! HTTP server entry point for the todo service.
//!
//! Configuration comes from flags or `TODOS_*` environment variables; see
//! [`todos::config::AppConfig`]. Without `TODOS_DATABASE_URL` the server keeps
//! todos in memory.

use clap::Parser;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use std::{error::Error, sync::Arc};
use todos::{
    config::{AppConfig, StorageBackend},
    telemetry::init_logging,
    todo::{
        adapters::{http::router, memory::InMemoryTodoRepository, postgres::PostgresTodoRepository},
        services::TodoService,
    },
};
use tokio::net::TcpListener;
use tracing::{info, warn};

type BoxError = Box<dyn Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::parse();
    init_logging(&config.log_level, config.log_format)?;

    let app = match config.storage() {
        StorageBackend::Memory => {
            warn!("no database configured, todos are kept in memory");
            router(TodoService::new(Arc::new(InMemoryTodoRepository::new())))
        }
        StorageBackend::Postgres { url, pool_size } => {
            let pool = Pool::builder()
                .max_size(pool_size)
                .build(ConnectionManager::<PgConnection>::new(url))?;
            let repository = PostgresTodoRepository::new(pool);
            repository.ensure_schema().await?;
            info!(pool_size, "connected to PostgreSQL");
            router(TodoService::new(Arc::new(repository)))
        }
    };

    let listener = TcpListener::bind(config.bind).await?;
    info!(address = %listener.local_addr()?, "todo service listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("todo service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
