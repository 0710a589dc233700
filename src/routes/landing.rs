use serde::{Deserialize, Serialize};

// =========================================================
// Landing page types (line listing)
// =========================================================

/// Lightweight production-line descriptor for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineInfo {
    pub line_id: i64,
    pub line_name: String,
    pub factory_id: String,
    pub mill_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_info_json_shape() {
        let info = LineInfo {
            line_id: 7,
            line_name: "Cold Mill 2".to_string(),
            factory_id: "F1".to_string(),
            mill_id: Some("M2".to_string()),
        };
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["lineId"], 7);
        assert_eq!(json["lineName"], "Cold Mill 2");
        assert_eq!(json["millId"], "M2");
    }
}
