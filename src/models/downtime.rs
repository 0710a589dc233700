//! Downtime event domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One recorded stoppage on a production line.
///
/// Events are created and mutated by the event store; this backend only
/// reads them. For a given line, events never overlap and `end_time` (when
/// present) is never before `start_time`. An `end_time` of `None` means the
/// stoppage is still ongoing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DowntimeEvent {
    /// Production line the stoppage occurred on.
    pub line_id: i64,
    /// Factory the line belongs to.
    pub factory_id: String,
    /// Mill within the factory, when the site is subdivided.
    pub mill_id: Option<String>,
    /// Start of the stoppage interval.
    pub start_time: DateTime<Utc>,
    /// End of the stoppage interval; `None` while ongoing.
    pub end_time: Option<DateTime<Utc>>,
    /// Cause code for the stoppage.
    pub reason: Option<String>,
    /// Category code (coarser than the cause).
    pub category: Option<String>,
    /// Equipment code identifying the unit that stopped.
    pub equipment: Option<String>,
}

/// The event attribute that defines a node in the transition graph.
///
/// Fixed at request time; a single computation never mixes dimensions.
/// Adding a dimension is a compile-time-checked change: every mapping from
/// an event to a node value matches exhaustively on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingDimension {
    /// Group by cause code (the default).
    #[default]
    Reason,
    /// Group by category code.
    Category,
    /// Group by equipment code.
    Equipment,
}

impl GroupingDimension {
    /// The value an event contributes under this dimension, if it has one.
    ///
    /// Events without a value for the active dimension cannot contribute a
    /// node and are skipped by the sequence builder.
    pub fn value_of<'a>(&self, event: &'a DowntimeEvent) -> Option<&'a str> {
        let value = match self {
            GroupingDimension::Reason => event.reason.as_deref(),
            GroupingDimension::Category => event.category.as_deref(),
            GroupingDimension::Equipment => event.equipment.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupingDimension::Reason => "reason",
            GroupingDimension::Category => "category",
            GroupingDimension::Equipment => "equipment",
        }
    }
}

impl FromStr for GroupingDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reason" => Ok(Self::Reason),
            "category" => Ok(Self::Category),
            "equipment" => Ok(Self::Equipment),
            other => Err(format!("Unknown grouping dimension: {}", other)),
        }
    }
}

impl std::fmt::Display for GroupingDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(reason: Option<&str>, category: Option<&str>, equipment: Option<&str>) -> DowntimeEvent {
        DowntimeEvent {
            line_id: 1,
            factory_id: "F1".to_string(),
            mill_id: None,
            start_time: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            end_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()),
            reason: reason.map(String::from),
            category: category.map(String::from),
            equipment: equipment.map(String::from),
        }
    }

    #[test]
    fn test_value_of_selects_active_dimension() {
        let e = event(Some("jam"), Some("mechanical"), Some("press-3"));
        assert_eq!(GroupingDimension::Reason.value_of(&e), Some("jam"));
        assert_eq!(GroupingDimension::Category.value_of(&e), Some("mechanical"));
        assert_eq!(GroupingDimension::Equipment.value_of(&e), Some("press-3"));
    }

    #[test]
    fn test_value_of_missing_or_empty_is_none() {
        let e = event(None, Some(""), Some("press-3"));
        assert_eq!(GroupingDimension::Reason.value_of(&e), None);
        assert_eq!(GroupingDimension::Category.value_of(&e), None);
    }

    #[test]
    fn test_grouping_parse() {
        assert_eq!("reason".parse::<GroupingDimension>().unwrap(), GroupingDimension::Reason);
        assert_eq!(" Equipment ".parse::<GroupingDimension>().unwrap(), GroupingDimension::Equipment);
        assert!("speed".parse::<GroupingDimension>().is_err());
    }

    #[test]
    fn test_grouping_serializes_lowercase() {
        let json = serde_json::to_string(&GroupingDimension::Category).unwrap();
        assert_eq!(json, "\"category\"");
    }

    #[test]
    fn test_grouping_default_is_reason() {
        assert_eq!(GroupingDimension::default(), GroupingDimension::Reason);
    }

    #[test]
    fn test_event_json_uses_camel_case() {
        let e = event(Some("jam"), None, None);
        let json = serde_json::to_value(&e).unwrap();
        assert!(json.get("lineId").is_some());
        assert!(json.get("startTime").is_some());
        assert!(json.get("factoryId").is_some());
    }
}
