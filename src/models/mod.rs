//! Domain models for downtime analysis.
//!
//! These types describe the data the backend reasons about: recorded
//! stoppages on production lines, the grouping dimension used to label
//! transition nodes, and the validated filter sets that scope a query.

pub mod downtime;
pub mod filters;

pub use downtime::{DowntimeEvent, GroupingDimension};
pub use filters::{EventFilters, TransitionsFilters};
