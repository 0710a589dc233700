//! Diesel schema for the downtime event store.

diesel::table! {
    production_lines (line_id) {
        line_id -> Int8,
        line_name -> Text,
        factory_id -> Text,
        mill_id -> Nullable<Text>,
    }
}

diesel::table! {
    downtime_events (id) {
        id -> Int8,
        line_id -> Int8,
        factory_id -> Text,
        mill_id -> Nullable<Text>,
        start_time -> Timestamptz,
        end_time -> Nullable<Timestamptz>,
        reason -> Nullable<Text>,
        category -> Nullable<Text>,
        equipment -> Nullable<Text>,
    }
}

diesel::joinable!(downtime_events -> production_lines (line_id));

diesel::allow_tables_to_appear_in_same_query!(downtime_events, production_lines);
