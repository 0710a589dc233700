//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::downtime::{DowntimeEvent, GroupingDimension};
pub use crate::models::filters::{EventFilters, TransitionsFilters};
pub use crate::routes::events::EventListData;
pub use crate::routes::landing::LineInfo;
pub use crate::routes::transitions::{OtherTransitions, TransitionEdge, TransitionsData};
