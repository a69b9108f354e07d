//! Lineage graph and report types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::catalog::{ColumnDescriptor, ObjectKind};
use super::lineage::LineageEdge;

/// The assembled output of one extraction run.
///
/// Nodes are every catalog object; edges are every accepted lineage edge with a
/// sequential identifier. A graph is a snapshot and is never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineageGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// A catalog object projected for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Node identifier (the object name)
    pub id: String,

    /// Human-readable label
    pub label: String,

    /// Object kind
    #[serde(rename = "type")]
    pub kind: ObjectKind,

    /// Columns in declaration order
    pub columns: Vec<ColumnDescriptor>,
}

/// A lineage edge with its run-stable identifier (`e0`, `e1`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,

    #[serde(flatten)]
    pub edge: LineageEdge,
}

/// A lineage graph plus run metadata, as emitted to consumers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineageReport {
    pub graph: LineageGraph,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Label of the connection the catalog came from
    pub database: String,

    /// RFC 3339 timestamp of the run
    pub generated_at: String,

    /// Human-readable warnings from objects whose definitions could not be parsed
    pub parse_warnings: Vec<String>,

    pub node_count: usize,
    pub edge_count: usize,
}
