//! Repository configuration file support.
//!
//! This module provides utilities for reading repository configuration from
//! TOML configuration files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub postgres: PostgresSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// Postgres connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresSettings {
    #[serde(default)]
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout: default_connect_timeout(),
            idle_timeout: default_idle_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    100
}

impl RepositoryConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content)
            .map_err(|e| RepositoryError::configuration(format!("Invalid config file: {}", e)))
    }

    /// The first `repository.toml` found in the standard locations, if any.
    ///
    /// Searches the current directory, then the parent directory.
    pub fn default_location() -> Option<PathBuf> {
        let search_paths = [
            PathBuf::from("repository.toml"),
            PathBuf::from("../repository.toml"),
        ];
        search_paths.into_iter().find(|p| p.exists())
    }

    /// Load configuration from the default file location.
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        match Self::default_location() {
            Some(path) => Self::from_file(path),
            None => Err(RepositoryError::configuration(
                "No repository.toml found in standard locations",
            )),
        }
    }

    /// The configured repository type.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        self.repository
            .repo_type
            .parse()
            .map_err(RepositoryError::configuration)
    }

    /// Build a [`PostgresConfig`](super::PostgresConfig) from the file settings.
    #[cfg(feature = "postgres-repo")]
    pub fn postgres_config(&self) -> Result<super::PostgresConfig, RepositoryError> {
        if self.postgres.database_url.is_empty() {
            return Err(RepositoryError::configuration(
                "Postgres repository requires postgres.database_url in the config file",
            ));
        }
        Ok(super::PostgresConfig {
            database_url: self.postgres.database_url.clone(),
            max_pool_size: self.postgres.max_connections,
            min_pool_size: self.postgres.min_connections,
            connection_timeout_sec: self.postgres.connect_timeout,
            idle_timeout_sec: self.postgres.idle_timeout,
            max_retries: self.postgres.max_retries,
            retry_delay_ms: self.postgres.retry_delay_ms,
        })
    }
}
