//! Diesel row models for the downtime event store.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::api::LineInfo;
use crate::models::downtime::DowntimeEvent;

use super::schema::{downtime_events, production_lines};

/// Row model for `production_lines`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = production_lines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductionLineRow {
    pub line_id: i64,
    pub line_name: String,
    pub factory_id: String,
    pub mill_id: Option<String>,
}

impl From<ProductionLineRow> for LineInfo {
    fn from(row: ProductionLineRow) -> Self {
        LineInfo {
            line_id: row.line_id,
            line_name: row.line_name,
            factory_id: row.factory_id,
            mill_id: row.mill_id,
        }
    }
}

/// Row model for `downtime_events`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = downtime_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DowntimeEventRow {
    pub id: i64,
    pub line_id: i64,
    pub factory_id: String,
    pub mill_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub category: Option<String>,
    pub equipment: Option<String>,
}

impl From<DowntimeEventRow> for DowntimeEvent {
    fn from(row: DowntimeEventRow) -> Self {
        DowntimeEvent {
            line_id: row.line_id,
            factory_id: row.factory_id,
            mill_id: row.mill_id,
            start_time: row.start_time,
            end_time: row.end_time,
            reason: row.reason,
            category: row.category,
            equipment: row.equipment,
        }
    }
}
