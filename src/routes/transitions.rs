use serde::{Deserialize, Serialize};

use crate::models::downtime::GroupingDimension;

// =========================================================
// Downtime transitions types
// =========================================================

/// One ordered pair of grouping-dimension values observed consecutively on
/// the same line, with its pooled count and share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEdge {
    /// Source node value.
    pub from: String,
    /// Target node value.
    pub to: String,
    /// Number of times this transition was observed.
    pub count: u64,
    /// Share of all counted transitions, in percent (one decimal).
    pub percentage: f64,
}

/// Aggregate row for transitions beyond the top-N cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherTransitions {
    /// Sum of the counts of all truncated transitions.
    pub count: u64,
    /// Share of all counted transitions, in percent (one decimal).
    pub percentage: f64,
}

/// Complete downtime-transitions dataset.
///
/// `transitions` is ordered by count descending with a lexicographic
/// `(from, to)` tie-break, so identical inputs always produce identical
/// output. `other` is present only when more than `topN` distinct
/// transitions existed before truncation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionsData {
    /// Dimension that defined the transition nodes.
    pub grouping: GroupingDimension,
    /// Total number of counted transitions (the percentage denominator).
    pub total_transitions: u64,
    /// Unique node values across `from` and `to` before truncation.
    pub distinct_node_count: usize,
    /// Ranked transitions, at most `topN` entries.
    pub transitions: Vec<TransitionEdge>,
    /// Collapsed remainder, when truncation occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<OtherTransitions>,
}

impl TransitionsData {
    /// The "no data" result: zero qualifying transitions is a valid,
    /// successfully-computed outcome, not an error.
    pub fn empty(grouping: GroupingDimension) -> Self {
        Self {
            grouping,
            total_transitions: 0,
            distinct_node_count: 0,
            transitions: Vec::new(),
            other: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let data = TransitionsData::empty(GroupingDimension::Equipment);
        assert_eq!(data.total_transitions, 0);
        assert_eq!(data.distinct_node_count, 0);
        assert!(data.transitions.is_empty());
        assert!(data.other.is_none());
    }

    #[test]
    fn test_json_shape() {
        let data = TransitionsData {
            grouping: GroupingDimension::Reason,
            total_transitions: 3,
            distinct_node_count: 3,
            transitions: vec![TransitionEdge {
                from: "jam".to_string(),
                to: "jam".to_string(),
                count: 2,
                percentage: 66.7,
            }],
            other: Some(OtherTransitions {
                count: 1,
                percentage: 33.3,
            }),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["grouping"], "reason");
        assert_eq!(json["totalTransitions"], 3);
        assert_eq!(json["distinctNodeCount"], 3);
        assert_eq!(json["transitions"][0]["from"], "jam");
        assert_eq!(json["other"]["count"], 1);
    }

    #[test]
    fn test_other_omitted_when_absent() {
        let json = serde_json::to_value(TransitionsData::empty(GroupingDimension::Reason)).unwrap();
        assert!(json.get("other").is_none());
    }
}
