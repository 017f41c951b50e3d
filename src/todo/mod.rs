//! Todo management.
//!
//! Todos are created, partially updated, deleted, looked up by identifier,
//! and searched. Search results are split into incomplete and completed
//! groups. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
