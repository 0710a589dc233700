//! High-level service functions over the repository.
//!
//! These functions work with any repository implementation and are the
//! recommended entry points for application code (HTTP handlers, tests).

use super::repository::{FullRepository, RepositoryResult};
use crate::api::LineInfo;
use crate::models::downtime::DowntimeEvent;
use crate::models::filters::EventFilters;

/// Check whether the backing store is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// List all known production lines.
pub async fn list_lines(repo: &dyn FullRepository) -> RepositoryResult<Vec<LineInfo>> {
    let lines = repo.list_lines().await?;
    log::debug!("listed {} production lines", lines.len());
    Ok(lines)
}

/// Fetch downtime events matching the filters, ordered per line.
pub async fn fetch_downtime_events(
    repo: &dyn FullRepository,
    filters: &EventFilters,
) -> RepositoryResult<Vec<DowntimeEvent>> {
    let events = repo.fetch_downtime_events(filters).await?;
    log::debug!("fetched {} downtime events", events.len());
    Ok(events)
}
