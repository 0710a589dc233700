//! Validated filter sets for downtime queries.
//!
//! Raw query parameters arrive as loose strings at the HTTP boundary and are
//! normalized into these strongly-typed records by the filter resolver in
//! [`crate::services::filters`] before any business logic runs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::downtime::GroupingDimension;

/// Default number of top transitions returned when `topN` is absent.
pub const DEFAULT_TOP_N: usize = 12;

/// Filters scoping which downtime events are fetched from the event store.
///
/// Date bounds are inclusive calendar dates applied to the event's
/// `start_time` date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilters {
    pub mill: Option<String>,
    pub factory: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// The validated request for the downtime-transitions computation.
///
/// Invariants (enforced by the resolver): `top_n >= 1`, and
/// `start_date <= end_date` when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionsFilters {
    pub mill: Option<String>,
    pub factory: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Attribute defining transition nodes. Defaults to [`GroupingDimension::Reason`].
    pub grouping: GroupingDimension,
    /// Number of transitions kept before collapsing the rest into `other`.
    pub top_n: usize,
    /// Restrict counting to transitions whose source equals this value.
    pub from_value: Option<String>,
    /// Restrict counting to transitions whose target equals this value.
    pub to_value: Option<String>,
    /// Whether adjacent same-value events count as a transition.
    ///
    /// Included by default: a line stopping twice in a row for the same
    /// cause is real data. Excluding self-loops is an explicit caller
    /// choice via the `includeSelf` query parameter.
    pub include_self_transitions: bool,
}

impl Default for TransitionsFilters {
    fn default() -> Self {
        Self {
            mill: None,
            factory: None,
            start_date: None,
            end_date: None,
            grouping: GroupingDimension::default(),
            top_n: DEFAULT_TOP_N,
            from_value: None,
            to_value: None,
            include_self_transitions: true,
        }
    }
}

impl TransitionsFilters {
    /// The event-store filters implied by this request.
    pub fn event_filters(&self) -> EventFilters {
        EventFilters {
            mill: self.mill.clone(),
            factory: self.factory.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
