//! JSON output formatting.

use colscope_core::LineageReport;

/// Format the lineage report as JSON.
///
/// If `compact` is true, outputs minified JSON without whitespace.
pub fn format_json(report: &LineageReport, compact: bool) -> String {
    if compact {
        serde_json::to_string(report).expect("serialization cannot fail")
    } else {
        serde_json::to_string_pretty(report).expect("serialization cannot fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::report;

    #[test]
    fn test_json_pretty() {
        let json = format_json(&report(), false);
        assert!(json.contains('\n'));
        assert!(json.contains("\"graph\""));
        assert!(json.contains("\"parseWarnings\""));
    }

    #[test]
    fn test_json_compact() {
        let json = format_json(&report(), true);
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_json_shape() {
        let value: serde_json::Value = serde_json::from_str(&format_json(&report(), true)).unwrap();

        assert_eq!(value["metadata"]["database"], "HR");
        assert_eq!(value["metadata"]["nodeCount"], 3);
        assert_eq!(value["metadata"]["edgeCount"], 4);
        assert_eq!(value["graph"]["nodes"][0]["type"], "table");

        let edge = &value["graph"]["edges"][0];
        assert_eq!(edge["id"], "e0");
        assert_eq!(edge["sourceObject"], "employees");
        assert_eq!(edge["targetObject"], "v_pay");
        assert_eq!(edge["edgeType"], "direct");

        let warnings = value["metadata"]["parseWarnings"].as_array().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].as_str().unwrap().starts_with("v_broken: "));
    }
}
