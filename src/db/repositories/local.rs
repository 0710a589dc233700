//! In-memory local repository implementation.
//!
//! This module provides a local implementation of the repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory, providing fast, deterministic, and isolated execution.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::LineInfo;
use crate::db::repository::{
    DowntimeRepository, LineRepository, RepositoryError, RepositoryResult,
};
use crate::models::downtime::DowntimeEvent;
use crate::models::filters::EventFilters;

/// In-memory local repository.
///
/// Stores the line registry and event log in memory, making it ideal for
/// unit tests and local development that need isolation and speed.
///
/// # Example
/// ```ignore
/// let repo = LocalRepository::new();
/// repo.insert_events(vec![/* ... */]);
/// let events = repo.fetch_downtime_events(&EventFilters::default()).await?;
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    lines: BTreeMap<i64, LineInfo>,
    events: Vec<DowntimeEvent>,
    is_healthy: bool,
    fail_fetches: bool,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                is_healthy: true,
                ..Default::default()
            })),
        }
    }

    /// Register a production line.
    pub fn insert_line(&self, line: LineInfo) {
        let mut data = self.data.write();
        data.lines.insert(line.line_id, line);
    }

    /// Append downtime events to the log.
    ///
    /// Lines referenced by the events are auto-registered with a synthetic
    /// name so listings stay consistent with the event population.
    pub fn insert_events(&self, events: Vec<DowntimeEvent>) {
        let mut data = self.data.write();
        for event in &events {
            data.lines.entry(event.line_id).or_insert_with(|| LineInfo {
                line_id: event.line_id,
                line_name: format!("Line {}", event.line_id),
                factory_id: event.factory_id.clone(),
                mill_id: event.mill_id.clone(),
            });
        }
        data.events.extend(events);
    }

    /// Toggle the simulated health state (for failure-path tests).
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Make subsequent event fetches fail (for failure-path tests).
    pub fn set_fetch_failing(&self, failing: bool) {
        self.data.write().fail_fetches = failing;
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(event: &DowntimeEvent, filters: &EventFilters) -> bool {
    if let Some(ref factory) = filters.factory {
        if &event.factory_id != factory {
            return false;
        }
    }
    if let Some(ref mill) = filters.mill {
        if event.mill_id.as_deref() != Some(mill.as_str()) {
            return false;
        }
    }
    let date = event.start_time.date_naive();
    if let Some(start) = filters.start_date {
        if date < start {
            return false;
        }
    }
    if let Some(end) = filters.end_date {
        if date > end {
            return false;
        }
    }
    true
}

#[async_trait]
impl DowntimeRepository for LocalRepository {
    async fn fetch_downtime_events(
        &self,
        filters: &EventFilters,
    ) -> RepositoryResult<Vec<DowntimeEvent>> {
        let data = self.data.read();
        if data.fail_fetches {
            return Err(RepositoryError::connection("event store unavailable")
                .with_operation("fetch_downtime_events"));
        }
        let mut events: Vec<DowntimeEvent> = data
            .events
            .iter()
            .filter(|e| matches(e, filters))
            .cloned()
            .collect();
        // Fetcher contract: ordered by (line_id, start_time) ascending.
        events.sort_by_key(|e| (e.line_id, e.start_time));
        Ok(events)
    }
}

#[async_trait]
impl LineRepository for LocalRepository {
    async fn list_lines(&self) -> RepositoryResult<Vec<LineInfo>> {
        let data = self.data.read();
        Ok(data.lines.values().cloned().collect())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}
