#![allow(dead_code)]

use colscope_core::{Catalog, Connector, DocumentConnector, EdgeType, LineageGraph};
use std::fs;
use std::path::PathBuf;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {err}", path.display()))
}

/// The HR sample document as parsed JSON, for tests that edit it.
pub fn hr_document() -> serde_json::Value {
    serde_json::from_str(&load_fixture("hr.json")).expect("hr fixture is valid JSON")
}

pub fn hr_connector() -> DocumentConnector {
    DocumentConnector::from_json(&load_fixture("hr.json")).expect("hr fixture parses")
}

pub fn hr_catalog() -> Catalog {
    hr_connector().get_all_objects().expect("hr catalog")
}

/// `(source_object.source_column, edge_type)` for every edge into `target.column`.
pub fn sources_of(graph: &LineageGraph, target: &str, column: &str) -> Vec<(String, EdgeType)> {
    graph
        .edges
        .iter()
        .filter(|e| e.edge.target_object == target && e.edge.target_column == column)
        .map(|e| (e.edge.source().to_string(), e.edge.edge_type))
        .collect()
}

pub fn edge_count_for(graph: &LineageGraph, target: &str) -> usize {
    graph
        .edges
        .iter()
        .filter(|e| e.edge.target_object == target)
        .count()
}
