//! Database module for the downtime event store.
//!
//! This module provides abstractions for database operations via the
//! Repository pattern, allowing different storage backends to be swapped
//! easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, tests)                    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs, services::transitions)     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴──────────────┐
//!     │ LocalRepository (in-memory)  │
//!     │ PostgresRepository (Diesel)  │
//!     └──────────────────────────────┘
//! ```
//!
//! # Repository Pattern
//! The module includes:
//! - `services`: High-level functions that work with any repository
//! - `repository`: Trait definitions and error types
//! - `repositories::local`: In-memory implementation for tests and local use
//! - `repositories::postgres`: Postgres implementation with Diesel ORM
//! - `factory`: Factory for creating repository instances
//! - `repo_config`: TOML configuration file support

// When multiple backend features are enabled, postgres takes precedence
// at runtime selection; at least one backend must be compiled in.
#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// Postgres config is colocated with the repository implementation.
#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

// ==================== Service Layer ====================

pub use services::{fetch_downtime_events, health_check, list_lines};

// ==================== Repository Pattern Exports ====================

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    DowntimeRepository, ErrorContext, FullRepository, LineRepository, RepositoryError,
    RepositoryResult,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Select the backend for this process.
///
/// Selection order: an explicit `REPOSITORY_CONFIG` file path, then a
/// `repository.toml` in the standard locations, then environment variables.
async fn create_selected_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    if let Ok(path) = std::env::var("REPOSITORY_CONFIG") {
        return RepositoryFactory::from_config_file(path).await;
    }
    if RepositoryConfig::default_location().is_some() {
        let config = RepositoryConfig::from_default_location()?;
        return RepositoryFactory::from_repository_config(&config).await;
    }
    RepositoryFactory::from_env().await
}

/// Initialize the global repository singleton for the selected backend.
pub async fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository().await?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
