//! Embedded `PostgreSQL` cluster lifecycle for integration tests.
//!
//! One cluster is started per test binary and shared by every test. Each test
//! works in its own database cloned from a pre-migrated template.


use self::env::{env_vars_to_os, worker_env_changes};
use self::fs::{sync_password_from_file, sync_port_from_pid};
use crate::test_helpers::EnvVarGuard;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::worker_process_test_api::{
    WorkerOperation, WorkerRequest, WorkerRequestArgs, run as run_worker,
};
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests};
use postgresql_embedded::{PostgreSQL, Settings, Status};
use rstest::fixture;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Duration;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SHARED_CLUSTER: OnceLock<Result<ManagedCluster, String>> = OnceLock::new();
static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Shared `PostgreSQL` cluster handle for integration tests.
pub type PostgresCluster = &'static ManagedCluster;

/// Builds database URLs for the running cluster.
#[derive(Debug, Clone)]
pub struct ClusterConnection {
    settings: Settings,
}

impl ClusterConnection {
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.settings.url(database)
    }
}

/// Embedded `PostgreSQL` cluster started once per test binary.
pub struct ManagedCluster {
    bootstrap: TestBootstrapSettings,
    // Held so the in-process server keeps running; unused when a worker owns it.
    _postgres: Option<PostgreSQL>,
}

impl ManagedCluster {
    fn new() -> Result<Self, BoxError> {
        let worker_guard = EnvVarGuard::set_many(&worker_env_changes()?);
        let mut bootstrap = bootstrap_for_tests().map_err(|err| Box::new(err) as BoxError)?;
        drop(worker_guard);
        sync_password_from_file(&mut bootstrap.settings)?;
        let env_vars = bootstrap.environment.to_env();
        let postgres = match bootstrap.privileges {
            ExecutionPrivileges::Root => {
                start_via_worker(&mut bootstrap, &env_vars)?;
                None
            }
            ExecutionPrivileges::Unprivileged => {
                Some(start_in_process(&mut bootstrap, &env_vars)?)
            }
        };
        Ok(Self {
            bootstrap,
            _postgres: postgres,
        })
    }

    #[must_use]
    pub fn connection(&self) -> ClusterConnection {
        ClusterConnection {
            settings: self.bootstrap.settings.clone(),
        }
    }

    /// Clones `template` into a fresh database that is dropped with the guard.
    ///
    /// # Errors
    ///
    /// Returns an error when `CREATE DATABASE` fails.
    pub fn temporary_database_from_template(
        &'static self,
        db_name: &str,
        template: &str,
    ) -> Result<TemporaryDatabase, BoxError> {
        let _guard = template_lock();
        let sql = format!(
            "CREATE DATABASE {} TEMPLATE {}",
            quote_identifier(db_name),
            quote_identifier(template),
        );
        self.execute_admin_sql(&sql)?;
        Ok(TemporaryDatabase {
            cluster: self,
            name: db_name.to_owned(),
            url: self.connection().database_url(db_name),
        })
    }

    /// Creates `template` and runs `migrate` against it unless it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error when creation or migration fails. A template whose
    /// migration failed is dropped again so the next caller retries.
    pub fn ensure_template_exists<F>(&self, template: &str, migrate: F) -> Result<(), BoxError>
    where
        F: FnOnce(&str) -> Result<(), BoxError>,
    {
        let _guard = template_lock();
        if self.database_exists(template)? {
            return Ok(());
        }

        self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(template)))?;
        if let Err(err) = migrate(template) {
            self.drop_database(template)?;
            return Err(err);
        }
        Ok(())
    }

    fn drop_database(&self, db_name: &str) -> Result<(), BoxError> {
        let sql = format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(db_name)
        );
        self.execute_admin_sql(&sql)
    }

    fn admin_connection(&self) -> Result<PgConnection, BoxError> {
        let url = self.connection().database_url("postgres");
        PgConnection::establish(&url).map_err(|err| Box::new(err) as BoxError)
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = self.admin_connection()?;
        diesel::sql_query(sql)
            .execute(&mut conn)
            .map_err(|err| Box::new(err) as BoxError)?;
        Ok(())
    }

    fn database_exists(&self, db_name: &str) -> Result<bool, BoxError> {
        #[derive(diesel::QueryableByName)]
        struct ExistsRow {
            #[diesel(sql_type = diesel::sql_types::Bool)]
            exists: bool,
        }

        let mut conn = self.admin_connection()?;
        let row = diesel::sql_query(
            "SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1) AS exists",
        )
        .bind::<diesel::sql_types::Text, _>(db_name)
        .get_result::<ExistsRow>(&mut conn)
        .map_err(|err| Box::new(err) as BoxError)?;
        Ok(row.exists)
    }
}

fn start_in_process(
    bootstrap: &mut TestBootstrapSettings,
    env_vars: &[(String, Option<String>)],
) -> Result<PostgreSQL, BoxError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)?;
    let env_guard = EnvVarGuard::set_many(&env_vars_to_os(env_vars));
    let mut postgres = PostgreSQL::new(bootstrap.settings.clone());
    let started = runtime.block_on(async {
        postgres
            .setup()
            .await
            .map_err(|err| Box::new(err) as BoxError)?;
        if !matches!(postgres.status(), Status::Started) {
            postgres
                .start()
                .await
                .map_err(|err| Box::new(err) as BoxError)?;
        }
        Ok::<(), BoxError>(())
    });
    drop(env_guard);
    started?;

    bootstrap.settings = postgres.settings().clone();
    sync_port_from_pid(&mut bootstrap.settings)?;
    Ok(postgres)
}

fn start_via_worker(
    bootstrap: &mut TestBootstrapSettings,
    env_vars: &[(String, Option<String>)],
) -> Result<(), BoxError> {
    run_worker_operation(bootstrap, env_vars, WorkerOperation::Setup, bootstrap.setup_timeout)?;
    run_worker_operation(bootstrap, env_vars, WorkerOperation::Start, bootstrap.start_timeout)?;
    sync_port_from_pid(&mut bootstrap.settings)
}

fn run_worker_operation(
    bootstrap: &TestBootstrapSettings,
    env_vars: &[(String, Option<String>)],
    operation: WorkerOperation,
    timeout: Duration,
) -> Result<(), BoxError> {
    let worker = bootstrap.worker_binary.as_ref().ok_or_else(|| {
        Box::new(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "PG_EMBEDDED_WORKER is not set for worker operation",
        )) as BoxError
    })?;
    let args = WorkerRequestArgs {
        worker: worker.as_path(),
        settings: &bootstrap.settings,
        env_vars,
        operation,
        timeout,
    };
    run_worker(&WorkerRequest::new(args)).map_err(|err| Box::new(err) as BoxError)
}

/// A per-test database, dropped from the cluster when the guard goes away.
pub struct TemporaryDatabase {
    cluster: PostgresCluster,
    name: String,
    url: String,
}

impl TemporaryDatabase {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        drop(self.cluster.drop_database(&self.name));
    }
}

/// Provides the shared `PostgreSQL` cluster, starting it on first use.
///
/// Start-up runs on its own thread so the async runtime driving the test is
/// never asked to block on a nested runtime.
#[fixture]
pub fn postgres_cluster() -> Result<PostgresCluster, BoxError> {
    let outcome = SHARED_CLUSTER.get_or_init(|| {
        std::thread::spawn(|| ManagedCluster::new().map_err(|err| err.to_string()))
            .join()
            .unwrap_or_else(|_| Err("cluster start-up thread panicked".to_owned()))
    });
    outcome
        .as_ref()
        .map_err(|err| format!("failed to start PostgreSQL: {err}").into())
}

fn template_lock() -> MutexGuard<'static, ()> {
    TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
