use serde::{Deserialize, Serialize};

use crate::models::downtime::DowntimeEvent;

// =========================================================
// Raw event listing types
// =========================================================

/// Downtime events matching a filter set, returned verbatim.
///
/// This is the un-analyzed counterpart of the transitions endpoint: the
/// same filtered population, without sequencing or aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListData {
    pub events: Vec<DowntimeEvent>,
    pub total: usize,
}

impl EventListData {
    pub fn new(events: Vec<DowntimeEvent>) -> Self {
        let total = events.len();
        Self { events, total }
    }
}
