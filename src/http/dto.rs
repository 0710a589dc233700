//! Data Transfer Objects for the HTTP API.
//!
//! Most response DTOs are re-exported from the routes module since they
//! already derive Serialize/Deserialize; the raw query structs come from
//! the filter resolver so handlers and resolver agree on parameter names.

use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    DowntimeEvent, EventListData, GroupingDimension, LineInfo, OtherTransitions, TransitionEdge,
    TransitionsData,
};
pub use crate::services::filters::{RawEventsQuery, RawTransitionsQuery};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Production line list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineListResponse {
    /// List of known production lines
    pub lines: Vec<LineInfo>,
    /// Total count
    pub total: usize,
}
