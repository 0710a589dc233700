//! Postgres repository implementation using Diesel.
//!
//! This module implements the repository traits against a Postgres database
//! holding the downtime event log and the production-line registry.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::NaiveTime;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::api::LineInfo;
use crate::db::repository::{
    DowntimeRepository, ErrorContext, LineRepository, RepositoryError, RepositoryResult,
};
use crate::models::downtime::DowntimeEvent;
use crate::models::filters::EventFilters;

mod models;
mod schema;

use models::{DowntimeEventRow, ProductionLineRow};

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", 10),
            min_pool_size: env_or("PG_POOL_MIN", 1),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", 30),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", 600),
            max_retries: env_or("PG_MAX_RETRIES", 3),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", 100),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Diesel-backed repository for Postgres.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// Retries up to `max_retries` times with exponential backoff when a
    /// retryable error occurs (connection errors, serialization failures).
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    log::warn!("retrying repository operation (attempt {})", attempt + 1);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Blocking task join error: {}", e),
                ErrorContext::new("with_conn"),
            )
        })?
    }
}

#[async_trait]
impl DowntimeRepository for PostgresRepository {
    async fn fetch_downtime_events(
        &self,
        filters: &EventFilters,
    ) -> RepositoryResult<Vec<DowntimeEvent>> {
        let filters = filters.clone();
        self.with_conn(move |conn| {
            use schema::downtime_events::dsl::*;

            let mut query = downtime_events.into_boxed();

            if let Some(ref factory) = filters.factory {
                query = query.filter(factory_id.eq(factory.clone()));
            }
            if let Some(ref mill) = filters.mill {
                query = query.filter(mill_id.eq(mill.clone()));
            }
            // Inclusive calendar-date bounds on the event start time.
            if let Some(start) = filters.start_date {
                let lower = start.and_time(NaiveTime::MIN).and_utc();
                query = query.filter(start_time.ge(lower));
            }
            if let Some(end) = filters.end_date {
                match end.succ_opt() {
                    Some(next_day) => {
                        let upper = next_day.and_time(NaiveTime::MIN).and_utc();
                        query = query.filter(start_time.lt(upper));
                    }
                    // endDate at the calendar maximum cannot exclude anything.
                    None => {
                        query = query.filter(start_time.le(chrono::DateTime::<chrono::Utc>::MAX_UTC));
                    }
                }
            }

            let rows: Vec<DowntimeEventRow> = query
                .order((line_id.asc(), start_time.asc()))
                .select(DowntimeEventRow::as_select())
                .load(conn)
                .map_err(|e| {
                    RepositoryError::from(e).with_operation("fetch_downtime_events")
                })?;

            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }
}

#[async_trait]
impl LineRepository for PostgresRepository {
    async fn list_lines(&self) -> RepositoryResult<Vec<LineInfo>> {
        self.with_conn(|conn| {
            use schema::production_lines::dsl::*;

            let rows: Vec<ProductionLineRow> = production_lines
                .order(line_id.asc())
                .select(ProductionLineRow::as_select())
                .load(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("list_lines"))?;

            Ok(rows.into_iter().map(Into::into).collect())
        })
        .await
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map_err(|e| RepositoryError::from(e).with_operation("health_check"))?;
            Ok(true)
        })
        .await
    }
}
