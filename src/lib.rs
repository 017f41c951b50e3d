//! Todos: a small task-tracking service.
//!
//! The crate stores todo items, applies partial updates without losing
//! concurrent writes, and answers searches with results split into
//! incomplete and completed groups.
//!
//! # Architecture
//!
//! The todo context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage
//! - **Adapters**: In-memory, `PostgreSQL`, and HTTP implementations
//!
//! # Modules
//!
//! - [`todo`]: Todo domain, storage, service, and HTTP boundary
//! - [`config`]: Process configuration from flags and environment
//! - [`telemetry`]: Structured logging setup

pub mod config;
pub mod telemetry;
pub mod todo;
