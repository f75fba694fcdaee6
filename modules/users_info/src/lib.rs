//! User domain service: validation, uniqueness and lifecycle rules in front
//! of a pluggable user store.

// === PUBLIC CONTRACT ===
pub mod contract;

// Re-export the public contract components
pub use contract::{client, error, model};

pub mod config;
pub use config::UsersInfoConfig;

// === INTERNAL MODULES ===
// Exposed for wiring in binaries and for tests. Other modules should go
// through `contract`.
pub mod domain;
pub mod gateways;
pub mod infra;

use std::sync::Arc;

use domain::service::Service;
use infra::storage::InMemoryUsersRepository;

/// Service wired to a fresh in-memory store, plus the store handle.
pub fn in_memory_service(config: &UsersInfoConfig) -> (Service, Arc<InMemoryUsersRepository>) {
    let repo = Arc::new(InMemoryUsersRepository::new(config));
    (Service::new(repo.clone()), repo)
}
