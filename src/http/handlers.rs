//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for filter resolution and analytics.

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{HealthResponse, LineListResponse, RawEventsQuery, RawTransitionsQuery};
use super::error::AppError;
use super::state::AppState;
use crate::api::{EventListData, TransitionsData};
use crate::db::services as db_services;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the event
/// store is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Production Lines
// =============================================================================

/// GET /v1/lines
///
/// List all known production lines.
pub async fn list_lines(State(state): State<AppState>) -> HandlerResult<LineListResponse> {
    let lines = db_services::list_lines(state.repository.as_ref()).await?;
    let total = lines.len();

    Ok(Json(LineListResponse { lines, total }))
}

// =============================================================================
// Downtime Analytics
// =============================================================================

/// GET /v1/downtime/events
///
/// List downtime events matching the filters, without analysis.
pub async fn get_downtime_events(
    State(state): State<AppState>,
    Query(query): Query<RawEventsQuery>,
) -> HandlerResult<EventListData> {
    let filters = services::resolve_event_filters(&query).map_err(AppError::Service)?;
    let events = db_services::fetch_downtime_events(state.repository.as_ref(), &filters).await?;

    Ok(Json(EventListData::new(events)))
}

/// GET /v1/downtime/transitions
///
/// Compute the ranked downtime-transition analysis for the filtered event
/// population. An empty population yields an empty result, not an error.
pub async fn get_downtime_transitions(
    State(state): State<AppState>,
    Query(query): Query<RawTransitionsQuery>,
) -> HandlerResult<TransitionsData> {
    let filters = services::resolve_transitions_filters(&query).map_err(AppError::Service)?;
    let data = services::get_transitions_data(state.repository.as_ref(), &filters)
        .await
        .map_err(AppError::Service)?;

    Ok(Json(data))
}
