//! Integration tests for the colscope CLI against live databases.
//!
//! SQLite databases are created on the fly with rusqlite, so these run with a
//! plain `cargo test` whenever the `metadata-provider` feature is enabled.

#![cfg(feature = "metadata-provider")]

mod sqlite;

use std::process::{Command, Output};

/// Run the colscope CLI with the given arguments and return the output.
pub fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_colscope"))
        .args(args)
        .output()
        .expect("failed to execute colscope CLI")
}

/// Run the colscope CLI and assert it succeeds.
pub fn run_cli_success(args: &[&str]) -> Output {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "CLI failed with status {:?}\nstderr: {}\nstdout: {}",
            output.status.code(),
            stderr,
            stdout
        );
    }
    output
}

/// Parse stdout as JSON, panicking with the raw output on failure.
pub fn parse_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON output, but parsing failed: {}\nOutput was: {}",
            e, stdout
        )
    })
}

/// Names of the report's graph nodes, in order.
pub fn node_names(report: &serde_json::Value) -> Vec<String> {
    report["graph"]["nodes"]
        .as_array()
        .expect("nodes array")
        .iter()
        .map(|node| node["id"].as_str().expect("node id").to_string())
        .collect()
}

/// `(sourceObject.sourceColumn, targetObject.targetColumn, edgeType)` triples.
pub fn edge_triples(report: &serde_json::Value) -> Vec<(String, String, String)> {
    report["graph"]["edges"]
        .as_array()
        .expect("edges array")
        .iter()
        .map(|edge| {
            let field = |name: &str| edge[name].as_str().expect("edge field").to_string();
            (
                format!("{}.{}", field("sourceObject"), field("sourceColumn")),
                format!("{}.{}", field("targetObject"), field("targetColumn")),
                field("edgeType"),
            )
        })
        .collect()
}
