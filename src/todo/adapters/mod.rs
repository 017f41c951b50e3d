//! Adapter implementations for todo ports.
//!
//! - [`memory`]: in-process store for tests and storage-less deployments
//! - [`postgres`]: `PostgreSQL` store backed by Diesel
//! - [`http`]: axum request boundary in front of the todo service

pub mod http;
pub mod memory;
pub mod postgres;
