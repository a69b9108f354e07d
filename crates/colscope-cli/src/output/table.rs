//! Human-readable table output formatting.

use colscope_core::{GraphEdge, LineageReport};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Format the lineage report as human-readable text with optional colors.
pub fn format_table(report: &LineageReport, quiet: bool, use_colors: bool) -> String {
    let colored = use_colors && std::io::stdout().is_terminal();
    let mut out = String::new();

    write_header(&mut out, report, colored);
    write_summary(&mut out, report, colored);
    write_lineage(&mut out, report, colored);

    if !quiet {
        write_warnings(&mut out, report, colored);
    }

    out
}

fn write_header(out: &mut String, report: &LineageReport, colored: bool) {
    let title = format!("Column Lineage: {}", report.metadata.database);
    let line = "═".repeat(50);

    if colored {
        writeln!(out, "{}", title.bold()).unwrap();
        writeln!(out, "{}", line.dimmed()).unwrap();
    } else {
        writeln!(out, "{title}").unwrap();
        writeln!(out, "{line}").unwrap();
    }
}

fn write_summary(out: &mut String, report: &LineageReport, colored: bool) {
    let metadata = &report.metadata;
    let stats = format!(
        "Summary: {} objects | {} edges | {} warnings",
        metadata.node_count,
        metadata.edge_count,
        metadata.parse_warnings.len()
    );

    if colored {
        writeln!(out, "{}", stats.cyan()).unwrap();
    } else {
        writeln!(out, "{stats}").unwrap();
    }

    writeln!(out).unwrap();
}

fn write_lineage(out: &mut String, report: &LineageReport, colored: bool) {
    let graph = &report.graph;
    if graph.edges.is_empty() {
        writeln!(out, "No column lineage found.").unwrap();
        writeln!(out).unwrap();
        return;
    }

    // Catalog targets in node order, then targets outside the catalog in
    // edge order
    let mut listed: Vec<&str> = Vec::new();
    for node in &graph.nodes {
        let incoming = incoming_edges(&graph.edges, &node.id);
        if incoming.is_empty() {
            continue;
        }
        listed.push(&node.id);
        let heading = format!("{} ({})", node.label, node.kind.as_str());
        write_target(out, &heading, &incoming, colored);
    }

    for edge in &graph.edges {
        let target = edge.edge.target_object.as_str();
        if listed.iter().any(|id| id.eq_ignore_ascii_case(target)) {
            continue;
        }
        listed.push(target);
        write_target(out, target, &incoming_edges(&graph.edges, target), colored);
    }
}

fn incoming_edges<'a>(edges: &'a [GraphEdge], target: &str) -> Vec<&'a GraphEdge> {
    edges
        .iter()
        .filter(|e| e.edge.target_object.eq_ignore_ascii_case(target))
        .collect()
}

/// One target object: its columns in edge order, each with its sources.
fn write_target(out: &mut String, heading: &str, incoming: &[&GraphEdge], colored: bool) {
    if colored {
        writeln!(out, "{}", heading.bold()).unwrap();
    } else {
        writeln!(out, "{heading}").unwrap();
    }

    let mut columns: Vec<&str> = Vec::new();
    for edge in incoming {
        if !columns.contains(&edge.edge.target_column.as_str()) {
            columns.push(&edge.edge.target_column);
        }
    }

    for column in columns {
        if colored {
            writeln!(out, "  {}", column.green()).unwrap();
        } else {
            writeln!(out, "  {column}").unwrap();
        }

        for edge in incoming.iter().filter(|e| e.edge.target_column == column) {
            let source = edge.edge.source();
            let tag = format!("[{}]", edge.edge.edge_type);
            if colored {
                writeln!(out, "    ← {source} {}", tag.dimmed()).unwrap();
            } else {
                writeln!(out, "    ← {source} {tag}").unwrap();
            }
        }
    }
    writeln!(out).unwrap();
}

fn write_warnings(out: &mut String, report: &LineageReport, colored: bool) {
    let warnings = &report.metadata.parse_warnings;
    if warnings.is_empty() {
        return;
    }

    if colored {
        writeln!(out, "{}", "Warnings:".bold()).unwrap();
    } else {
        writeln!(out, "Warnings:").unwrap();
    }

    for warning in warnings {
        if colored {
            writeln!(out, "  {} {warning}", "⚠".yellow()).unwrap();
        } else {
            writeln!(out, "  ⚠ {warning}").unwrap();
        }
    }
}
