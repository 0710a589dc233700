//! Filter resolver: raw query input to validated filter sets.
//!
//! Query parameters arrive from the request boundary as loose, optional
//! strings. This stage turns them into a strongly-typed, exhaustively
//! validated [`TransitionsFilters`] before any business logic executes,
//! rejecting early instead of defaulting silently through the pipeline.
//!
//! Declared policies (applied consistently):
//! - `grouping`: unrecognized or absent values fall back to `reason`.
//! - `topN`: non-numeric or non-positive values hard-fail with
//!   [`ServiceError::InvalidParameter`] so client bugs are not masked.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{ServiceError, ServiceResult};
use crate::models::downtime::GroupingDimension;
use crate::models::filters::{EventFilters, TransitionsFilters, DEFAULT_TOP_N};

/// Raw query parameters for the transitions endpoint, as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransitionsQuery {
    #[serde(default)]
    pub mill: Option<String>,
    #[serde(default)]
    pub factory: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub grouping: Option<String>,
    #[serde(default)]
    pub top_n: Option<String>,
    #[serde(default)]
    pub from_value: Option<String>,
    #[serde(default)]
    pub to_value: Option<String>,
    #[serde(default)]
    pub include_self: Option<String>,
}

/// Raw query parameters for the raw-events listing endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventsQuery {
    #[serde(default)]
    pub mill: Option<String>,
    #[serde(default)]
    pub factory: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Resolve the transitions request into a validated filter set.
pub fn resolve_transitions_filters(raw: &RawTransitionsQuery) -> ServiceResult<TransitionsFilters> {
    let start_date = parse_date("startDate", raw.start_date.as_deref())?;
    let end_date = parse_date("endDate", raw.end_date.as_deref())?;
    check_date_order(start_date, end_date)?;

    // Policy: unknown grouping values default to `reason` rather than fail.
    let grouping = raw
        .grouping
        .as_deref()
        .and_then(|s| s.parse::<GroupingDimension>().ok())
        .unwrap_or_default();

    let top_n = parse_top_n(raw.top_n.as_deref())?;
    let include_self_transitions = parse_bool("includeSelf", raw.include_self.as_deref(), true)?;

    Ok(TransitionsFilters {
        mill: normalize(raw.mill.as_deref()),
        factory: normalize(raw.factory.as_deref()),
        start_date,
        end_date,
        grouping,
        top_n,
        from_value: normalize(raw.from_value.as_deref()),
        to_value: normalize(raw.to_value.as_deref()),
        include_self_transitions,
    })
}

/// Resolve the raw-events request into event-store filters.
pub fn resolve_event_filters(raw: &RawEventsQuery) -> ServiceResult<EventFilters> {
    let start_date = parse_date("startDate", raw.start_date.as_deref())?;
    let end_date = parse_date("endDate", raw.end_date.as_deref())?;
    check_date_order(start_date, end_date)?;

    Ok(EventFilters {
        mill: normalize(raw.mill.as_deref()),
        factory: normalize(raw.factory.as_deref()),
        start_date,
        end_date,
    })
}

/// Blank strings are treated as absent parameters.
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn parse_date(field: &'static str, value: Option<&str>) -> ServiceResult<Option<NaiveDate>> {
    match normalize(value) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ServiceError::invalid_parameter(field, s, "expected an ISO calendar date (YYYY-MM-DD)")
            }),
    }
}

fn check_date_order(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ServiceResult<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(ServiceError::invalid_parameter(
                "startDate",
                start.to_string(),
                format!("startDate must not be after endDate ({})", end),
            ));
        }
    }
    Ok(())
}

fn parse_top_n(value: Option<&str>) -> ServiceResult<usize> {
    match normalize(value) {
        None => Ok(DEFAULT_TOP_N),
        Some(s) => {
            let n: i64 = s.parse().map_err(|_| {
                ServiceError::invalid_parameter("topN", s.clone(), "expected an integer")
            })?;
            if n < 1 {
                return Err(ServiceError::invalid_parameter(
                    "topN",
                    s,
                    "must be a positive integer",
                ));
            }
            Ok(n as usize)
        }
    }
}

fn parse_bool(field: &'static str, value: Option<&str>, default: bool) -> ServiceResult<bool> {
    match normalize(value) {
        None => Ok(default),
        Some(s) => match s.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ServiceError::invalid_parameter(
                field,
                s,
                "expected `true` or `false`",
            )),
        },
    }
}
