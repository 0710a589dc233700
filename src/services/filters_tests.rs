#[cfg(test)]
mod tests {
    use crate::models::downtime::GroupingDimension;
    use crate::models::filters::DEFAULT_TOP_N;
    use crate::services::error::ServiceError;
    use crate::services::filters::{
        resolve_event_filters, resolve_transitions_filters, RawEventsQuery, RawTransitionsQuery,
    };
    use chrono::NaiveDate;

    fn field_of(err: ServiceError) -> &'static str {
        err.field().expect("expected an InvalidParameter error")
    }

    #[test]
    fn test_resolve_empty_query_yields_defaults() {
        let filters = resolve_transitions_filters(&RawTransitionsQuery::default()).unwrap();

        assert_eq!(filters.top_n, DEFAULT_TOP_N);
        assert_eq!(filters.grouping, GroupingDimension::Reason);
        assert!(filters.include_self_transitions);
        assert!(filters.mill.is_none());
        assert!(filters.from_value.is_none());
    }

    #[test]
    fn test_resolve_full_query() {
        let raw = RawTransitionsQuery {
            mill: Some("M2".to_string()),
            factory: Some("F1".to_string()),
            start_date: Some("2024-05-01".to_string()),
            end_date: Some("2024-05-31".to_string()),
            grouping: Some("equipment".to_string()),
            top_n: Some("5".to_string()),
            from_value: Some("press-3".to_string()),
            to_value: Some("saw-1".to_string()),
            include_self: Some("false".to_string()),
        };
        let filters = resolve_transitions_filters(&raw).unwrap();

        assert_eq!(filters.mill.as_deref(), Some("M2"));
        assert_eq!(filters.start_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(filters.end_date, NaiveDate::from_ymd_opt(2024, 5, 31));
        assert_eq!(filters.grouping, GroupingDimension::Equipment);
        assert_eq!(filters.top_n, 5);
        assert_eq!(filters.from_value.as_deref(), Some("press-3"));
        assert!(!filters.include_self_transitions);
    }

    #[test]
    fn test_unknown_grouping_defaults_to_reason() {
        let raw = RawTransitionsQuery {
            grouping: Some("velocity".to_string()),
            ..Default::default()
        };
        let filters = resolve_transitions_filters(&raw).unwrap();
        assert_eq!(filters.grouping, GroupingDimension::Reason);
    }

    #[test]
    fn test_non_numeric_top_n_fails() {
        let raw = RawTransitionsQuery {
            top_n: Some("dozen".to_string()),
            ..Default::default()
        };
        let err = resolve_transitions_filters(&raw).unwrap_err();
        assert_eq!(field_of(err), "topN");
    }

    #[test]
    fn test_zero_top_n_fails() {
        let raw = RawTransitionsQuery {
            top_n: Some("0".to_string()),
            ..Default::default()
        };
        let err = resolve_transitions_filters(&raw).unwrap_err();
        assert_eq!(field_of(err), "topN");
    }

    #[test]
    fn test_negative_top_n_fails() {
        let raw = RawTransitionsQuery {
            top_n: Some("-3".to_string()),
            ..Default::default()
        };
        assert!(resolve_transitions_filters(&raw).is_err());
    }

    #[test]
    fn test_malformed_start_date_fails() {
        let raw = RawTransitionsQuery {
            start_date: Some("05/01/2024".to_string()),
            ..Default::default()
        };
        let err = resolve_transitions_filters(&raw).unwrap_err();
        assert_eq!(field_of(err), "startDate");
    }

    #[test]
    fn test_malformed_end_date_fails() {
        let raw = RawTransitionsQuery {
            end_date: Some("not-a-date".to_string()),
            ..Default::default()
        };
        let err = resolve_transitions_filters(&raw).unwrap_err();
        assert_eq!(field_of(err), "endDate");
    }

    #[test]
    fn test_inverted_date_range_fails() {
        let raw = RawTransitionsQuery {
            start_date: Some("2024-06-01".to_string()),
            end_date: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        let err = resolve_transitions_filters(&raw).unwrap_err();
        assert_eq!(field_of(err), "startDate");
    }

    #[test]
    fn test_bad_include_self_fails() {
        let raw = RawTransitionsQuery {
            include_self: Some("yes".to_string()),
            ..Default::default()
        };
        let err = resolve_transitions_filters(&raw).unwrap_err();
        assert_eq!(field_of(err), "includeSelf");
    }

    #[test]
    fn test_blank_strings_treated_as_absent() {
        let raw = RawTransitionsQuery {
            mill: Some("  ".to_string()),
            top_n: Some("".to_string()),
            grouping: Some("".to_string()),
            ..Default::default()
        };
        let filters = resolve_transitions_filters(&raw).unwrap();
        assert!(filters.mill.is_none());
        assert_eq!(filters.top_n, DEFAULT_TOP_N);
        assert_eq!(filters.grouping, GroupingDimension::Reason);
    }

    #[test]
    fn test_values_are_trimmed() {
        let raw = RawTransitionsQuery {
            factory: Some(" F1 ".to_string()),
            top_n: Some(" 7 ".to_string()),
            ..Default::default()
        };
        let filters = resolve_transitions_filters(&raw).unwrap();
        assert_eq!(filters.factory.as_deref(), Some("F1"));
        assert_eq!(filters.top_n, 7);
    }

    #[test]
    fn test_resolve_event_filters() {
        let raw = RawEventsQuery {
            mill: Some("M1".to_string()),
            factory: None,
            start_date: Some("2024-05-01".to_string()),
            end_date: Some("2024-05-02".to_string()),
        };
        let filters = resolve_event_filters(&raw).unwrap();
        assert_eq!(filters.mill.as_deref(), Some("M1"));
        assert_eq!(filters.start_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_resolve_event_filters_rejects_inverted_range() {
        let raw = RawEventsQuery {
            start_date: Some("2024-05-02".to_string()),
            end_date: Some("2024-05-01".to_string()),
            ..Default::default()
        };
        assert!(resolve_event_filters(&raw).is_err());
    }
}
