//! Graph assembly and impact queries.

use crate::catalog::Catalog;
use crate::types::{
    ColumnRef, GraphEdge, GraphNode, LineageEdge, LineageGraph, LineageReport, ReportMetadata,
};
use chrono::{DateTime, Utc};
use std::collections::{HashSet, VecDeque};

/// Builds the graph for one run.
///
/// Nodes are the catalog's tables, views and procedures in that order. Edges
/// keep the order they are received in and are numbered `e0`, `e1`, ... No
/// deduplication happens here.
pub fn assemble_graph(catalog: &Catalog, edges: Vec<LineageEdge>) -> LineageGraph {
    let nodes = catalog
        .grouped()
        .map(|object| GraphNode {
            id: object.name.clone(),
            label: object.name.clone(),
            kind: object.kind,
            columns: object.columns.clone(),
        })
        .collect();

    let edges = edges
        .into_iter()
        .enumerate()
        .map(|(idx, edge)| GraphEdge {
            id: format!("e{idx}"),
            edge,
        })
        .collect();

    LineageGraph { nodes, edges }
}

/// Wraps a graph with run metadata stamped with the current time.
pub fn build_report(graph: LineageGraph, database: String, warnings: Vec<String>) -> LineageReport {
    build_report_at(graph, database, warnings, Utc::now())
}

pub fn build_report_at(
    graph: LineageGraph,
    database: String,
    warnings: Vec<String>,
    generated_at: DateTime<Utc>,
) -> LineageReport {
    let metadata = ReportMetadata {
        database,
        generated_at: generated_at.to_rfc3339(),
        parse_warnings: warnings,
        node_count: graph.nodes.len(),
        edge_count: graph.edges.len(),
    };

    LineageReport { graph, metadata }
}

/// Case-insensitive `object.column` key.
fn key(object: &str, column: &str) -> ColumnRef {
    ColumnRef::new(object.to_lowercase(), column.to_lowercase())
}

impl LineageGraph {
    /// Looks up a node by object name, ignoring case.
    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        let name = name.to_lowercase();
        self.nodes.iter().find(|node| node.id.to_lowercase() == name)
    }

    /// Columns that `object.column` is directly derived from.
    pub fn upstream(&self, object: &str, column: &str) -> Vec<ColumnRef> {
        let wanted = key(object, column);
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .filter(|edge| key(&edge.edge.target_object, &edge.edge.target_column) == wanted)
            .map(|edge| edge.edge.source())
            .filter(|source| seen.insert(key(&source.object, &source.column)))
            .collect()
    }

    /// Columns directly derived from `object.column`.
    pub fn downstream(&self, object: &str, column: &str) -> Vec<ColumnRef> {
        let wanted = key(object, column);
        let mut seen = HashSet::new();
        self.edges
            .iter()
            .filter(|edge| key(&edge.edge.source_object, &edge.edge.source_column) == wanted)
            .map(|edge| edge.edge.target())
            .filter(|target| seen.insert(key(&target.object, &target.column)))
            .collect()
    }

    /// Every column transitively derived from `object.column`, nearest first.
    ///
    /// Each column appears once; cycles in hand-written lineage terminate.
    pub fn impact(&self, object: &str, column: &str) -> Vec<ColumnRef> {
        let mut visited = HashSet::from([key(object, column)]);
        let mut queue = VecDeque::from([ColumnRef::new(object, column)]);
        let mut impacted = Vec::new();

        while let Some(current) = queue.pop_front() {
            for next in self.downstream(&current.object, &current.column) {
                if visited.insert(key(&next.object, &next.column)) {
                    impacted.push(next.clone());
                    queue.push_back(next);
                }
            }
        }

        impacted
    }
}
