//! Process configuration read from command-line flags and environment.

use clap::{Parser, ValueEnum};
use std::net::SocketAddr;

/// Default pool size for `PostgreSQL` connections.
pub const DEFAULT_POOL_SIZE: u32 = 8;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line, human-oriented output.
    Pretty,
    /// Single-line text output.
    #[default]
    Compact,
    /// One JSON object per line.
    Json,
}

/// Storage selected for the running service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local storage; data is lost on exit.
    Memory,
    /// `PostgreSQL` storage.
    Postgres {
        /// Connection URL.
        url: String,
        /// Maximum number of pooled connections.
        pool_size: u32,
    },
}

/// Todo service configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "todos", version, about = "Todo tracking HTTP service")]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    #[arg(long, env = "TODOS_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// `PostgreSQL` connection URL; in-memory storage is used when absent.
    #[arg(long, env = "TODOS_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "TODOS_POOL_SIZE", default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: u32,

    /// Log level used when `RUST_LOG` is unset.
    #[arg(long, env = "TODOS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, env = "TODOS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Returns the storage backend implied by the configuration.
    #[must_use]
    pub fn storage(&self) -> StorageBackend {
        match self.database_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => StorageBackend::Postgres {
                url: url.to_owned(),
                pool_size: self.pool_size,
            },
            _ => StorageBackend::Memory,
        }
    }
}
