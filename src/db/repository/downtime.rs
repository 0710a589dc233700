//! Downtime repository trait: the event fetcher contract.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::downtime::DowntimeEvent;
use crate::models::filters::EventFilters;

/// Repository trait for reading downtime events.
///
/// This is the contract the analysis core consumes the event store through.
/// The core never writes events.
///
/// # Ordering contract
///
/// `fetch_downtime_events` returns events for matching lines ordered by
/// `(line_id, start_time)` ascending. Callers must not assume any global
/// time-ordering across lines; only per-line ordering is guaranteed.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait DowntimeRepository: Send + Sync {
    /// Fetch downtime events matching the mill/factory/date filters.
    ///
    /// Date bounds are inclusive calendar dates applied to the event's
    /// start time.
    ///
    /// # Returns
    /// * `Ok(Vec<DowntimeEvent>)` - Matching events, ordered per the contract
    /// * `Err(RepositoryError)` - If the fetch fails
    async fn fetch_downtime_events(
        &self,
        filters: &EventFilters,
    ) -> RepositoryResult<Vec<DowntimeEvent>>;
}
