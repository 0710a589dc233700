#[cfg(test)]
mod tests {
    use crate::models::downtime::{DowntimeEvent, GroupingDimension};
    use crate::models::filters::TransitionsFilters;
    use crate::services::transitions::{
        aggregate_transitions, assemble_result, build_line_sequences, rank_transitions,
        TransitionCounts,
    };
    use chrono::{Duration, TimeZone, Utc};

    fn create_test_event(line_id: i64, offset_min: i64, reason: &str) -> DowntimeEvent {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 6, 0, 0).unwrap() + Duration::minutes(offset_min);
        DowntimeEvent {
            line_id,
            factory_id: "F1".to_string(),
            mill_id: Some("M1".to_string()),
            start_time: start,
            end_time: Some(start + Duration::minutes(10)),
            reason: Some(reason.to_string()),
            category: Some(format!("cat-{}", &reason[..1])),
            equipment: Some(format!("eq-{}", line_id)),
        }
    }

    /// Three lines: A = [X, X, Y], B = [Y, Z], C = [X] (too short).
    fn scenario_events() -> Vec<DowntimeEvent> {
        vec![
            create_test_event(1, 0, "X"),
            create_test_event(1, 30, "X"),
            create_test_event(1, 60, "Y"),
            create_test_event(2, 0, "Y"),
            create_test_event(2, 45, "Z"),
            create_test_event(3, 0, "X"),
        ]
    }

    fn count_of(counts: &TransitionCounts, from: &str, to: &str) -> u64 {
        counts
            .get(&(from.to_string(), to.to_string()))
            .copied()
            .unwrap_or(0)
    }

    #[test]
    fn test_build_sequences_groups_by_line_in_order() {
        let sequences = build_line_sequences(&scenario_events(), GroupingDimension::Reason);

        assert_eq!(sequences.len(), 3);
        assert_eq!(sequences[&1], vec!["X", "X", "Y"]);
        assert_eq!(sequences[&2], vec!["Y", "Z"]);
        assert_eq!(sequences[&3], vec!["X"]);
    }

    #[test]
    fn test_build_sequences_skips_events_without_dimension_value() {
        let mut events = scenario_events();
        events[1].reason = None;
        let sequences = build_line_sequences(&events, GroupingDimension::Reason);

        assert_eq!(sequences[&1], vec!["X", "Y"]);
    }

    #[test]
    fn test_aggregate_pools_across_lines() {
        let sequences = build_line_sequences(&scenario_events(), GroupingDimension::Reason);
        let counts = aggregate_transitions(&sequences, &TransitionsFilters::default());

        assert_eq!(counts.len(), 3);
        assert_eq!(count_of(&counts, "X", "X"), 1);
        assert_eq!(count_of(&counts, "X", "Y"), 1);
        assert_eq!(count_of(&counts, "Y", "Z"), 1);
    }

    #[test]
    fn test_aggregate_short_sequences_contribute_nothing() {
        let events = vec![create_test_event(9, 0, "X")];
        let sequences = build_line_sequences(&events, GroupingDimension::Reason);
        let counts = aggregate_transitions(&sequences, &TransitionsFilters::default());

        assert!(counts.is_empty());
    }

    #[test]
    fn test_aggregate_excludes_self_transitions_when_disabled() {
        let sequences = build_line_sequences(&scenario_events(), GroupingDimension::Reason);
        let filters = TransitionsFilters {
            include_self_transitions: false,
            ..Default::default()
        };
        let counts = aggregate_transitions(&sequences, &filters);

        assert_eq!(count_of(&counts, "X", "X"), 0);
        assert_eq!(count_of(&counts, "X", "Y"), 1);
        assert_eq!(count_of(&counts, "Y", "Z"), 1);
    }

    #[test]
    fn test_aggregate_from_value_constrains_population() {
        let sequences = build_line_sequences(&scenario_events(), GroupingDimension::Reason);
        let filters = TransitionsFilters {
            from_value: Some("X".to_string()),
            ..Default::default()
        };
        let counts = aggregate_transitions(&sequences, &filters);

        // Only X-sourced pairs: (X,X) and (X,Y). The denominator becomes 2.
        let total: u64 = counts.values().sum();
        assert_eq!(total, 2);
        assert_eq!(count_of(&counts, "Y", "Z"), 0);
    }

    #[test]
    fn test_aggregate_to_value_constrains_population() {
        let sequences = build_line_sequences(&scenario_events(), GroupingDimension::Reason);
        let filters = TransitionsFilters {
            to_value: Some("Y".to_string()),
            ..Default::default()
        };
        let counts = aggregate_transitions(&sequences, &filters);

        assert_eq!(counts.len(), 1);
        assert_eq!(count_of(&counts, "X", "Y"), 1);
    }

    #[test]
    fn test_rank_orders_by_count_then_lexicographic() {
        let mut counts = TransitionCounts::new();
        counts.insert(("B".to_string(), "B".to_string()), 5);
        counts.insert(("A".to_string(), "Z".to_string()), 5);
        counts.insert(("A".to_string(), "B".to_string()), 7);
        let (ranked, other) = rank_transitions(counts, 10);

        let order: Vec<(&str, &str)> = ranked
            .iter()
            .map(|((f, t), _)| (f.as_str(), t.as_str()))
            .collect();
        assert_eq!(order, vec![("A", "B"), ("A", "Z"), ("B", "B")]);
        assert!(other.is_none());
    }

    #[test]
    fn test_rank_truncates_and_sums_excluded() {
        let mut counts = TransitionCounts::new();
        counts.insert(("A".to_string(), "B".to_string()), 4);
        counts.insert(("B".to_string(), "C".to_string()), 3);
        counts.insert(("C".to_string(), "D".to_string()), 2);
        counts.insert(("D".to_string(), "E".to_string()), 1);
        let (ranked, other) = rank_transitions(counts, 2);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].1, 4);
        assert_eq!(ranked[1].1, 3);
        assert_eq!(other, Some(3));
    }

    #[test]
    fn test_rank_exactly_top_n_has_no_other() {
        let mut counts = TransitionCounts::new();
        counts.insert(("A".to_string(), "B".to_string()), 2);
        counts.insert(("B".to_string(), "C".to_string()), 1);
        let (ranked, other) = rank_transitions(counts, 2);

        assert_eq!(ranked.len(), 2);
        assert!(other.is_none());
    }

    #[test]
    fn test_assemble_scenario_percentages() {
        let sequences = build_line_sequences(&scenario_events(), GroupingDimension::Reason);
        let counts = aggregate_transitions(&sequences, &TransitionsFilters::default());
        let data = assemble_result(GroupingDimension::Reason, counts, 12);

        assert_eq!(data.total_transitions, 3);
        assert_eq!(data.distinct_node_count, 3);
        assert_eq!(data.transitions.len(), 3);
        assert!(data.other.is_none());
        for edge in &data.transitions {
            assert!((edge.percentage - 33.3).abs() < 1e-9);
        }
    }

    #[test]
    fn test_assemble_top_one_emits_other() {
        let sequences = build_line_sequences(&scenario_events(), GroupingDimension::Reason);
        let counts = aggregate_transitions(&sequences, &TransitionsFilters::default());
        let data = assemble_result(GroupingDimension::Reason, counts, 1);

        // All counts tie at 1; the lexicographic winner is (X, X).
        assert_eq!(data.transitions.len(), 1);
        assert_eq!(data.transitions[0].from, "X");
        assert_eq!(data.transitions[0].to, "X");
        let other = data.other.expect("other row expected");
        assert_eq!(other.count, 2);
        assert_eq!(data.total_transitions, 3);
    }

    #[test]
    fn test_assemble_from_value_recomputes_denominator() {
        let sequences = build_line_sequences(&scenario_events(), GroupingDimension::Reason);
        let filters = TransitionsFilters {
            from_value: Some("X".to_string()),
            ..Default::default()
        };
        let counts = aggregate_transitions(&sequences, &filters);
        let data = assemble_result(GroupingDimension::Reason, counts, 12);

        assert_eq!(data.total_transitions, 2);
        for edge in &data.transitions {
            assert!((edge.percentage - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_assemble_rounds_percentages_half_up() {
        // 1/16 = 6.25% and 15/16 = 93.75%: both sit exactly on the
        // one-decimal boundary and must round upward.
        let mut counts = TransitionCounts::new();
        counts.insert(("A".to_string(), "B".to_string()), 15);
        counts.insert(("B".to_string(), "A".to_string()), 1);
        let data = assemble_result(GroupingDimension::Reason, counts, 12);

        assert_eq!(data.total_transitions, 16);
        assert_eq!(data.transitions[0].percentage, 93.8);
        assert_eq!(data.transitions[1].percentage, 6.3);
    }

    #[test]
    fn test_assemble_empty_is_success() {
        let data = assemble_result(GroupingDimension::Reason, TransitionCounts::new(), 12);

        assert_eq!(data.total_transitions, 0);
        assert!(data.transitions.is_empty());
        assert!(data.other.is_none());
    }

    #[test]
    fn test_counts_sum_to_total_including_other() {
        let sequences = build_line_sequences(&scenario_events(), GroupingDimension::Reason);
        let counts = aggregate_transitions(&sequences, &TransitionsFilters::default());
        let data = assemble_result(GroupingDimension::Reason, counts, 1);

        let kept: u64 = data.transitions.iter().map(|t| t.count).sum();
        let other = data.other.as_ref().map(|o| o.count).unwrap_or(0);
        assert_eq!(kept + other, data.total_transitions);
    }

    #[test]
    fn test_percentages_sum_to_hundred_within_tolerance() {
        let sequences = build_line_sequences(&scenario_events(), GroupingDimension::Reason);
        let counts = aggregate_transitions(&sequences, &TransitionsFilters::default());
        let data = assemble_result(GroupingDimension::Reason, counts, 2);

        let mut sum: f64 = data.transitions.iter().map(|t| t.percentage).sum();
        if let Some(ref other) = data.other {
            sum += other.percentage;
        }
        // Rounding each row to one decimal can drift by at most 0.05 per row.
        assert!((sum - 100.0).abs() < 0.5, "sum was {}", sum);
    }

    #[test]
    fn test_grouping_independence_preserves_total() {
        let events = scenario_events();
        for grouping in [
            GroupingDimension::Reason,
            GroupingDimension::Category,
            GroupingDimension::Equipment,
        ] {
            let filters = TransitionsFilters {
                grouping,
                ..Default::default()
            };
            let sequences = build_line_sequences(&events, grouping);
            let counts = aggregate_transitions(&sequences, &filters);
            let total: u64 = counts.values().sum();
            assert_eq!(total, 3, "total changed for grouping {}", grouping);
        }
    }

    #[test]
    fn test_deterministic_output_across_runs() {
        let events = scenario_events();
        let filters = TransitionsFilters::default();
        let run = || {
            let sequences = build_line_sequences(&events, filters.grouping);
            let counts = aggregate_transitions(&sequences, &filters);
            let data = assemble_result(filters.grouping, counts, 2);
            serde_json::to_string(&data).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_aggregation_order_independent() {
        let mut reversed = scenario_events();
        reversed.reverse();
        // Restore per-line ordering; only the line interleaving differs.
        reversed.sort_by_key(|e| (std::cmp::Reverse(e.line_id), e.start_time));

        let filters = TransitionsFilters::default();
        let a = aggregate_transitions(&build_line_sequences(&scenario_events(), filters.grouping), &filters);
        let b = aggregate_transitions(&build_line_sequences(&reversed, filters.grouping), &filters);
        assert_eq!(a, b);
    }
}
