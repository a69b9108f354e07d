//! Types for the column lineage extraction API.
//!
//! This module defines the catalog model consumed by the extractor and the
//! lineage graph it produces.

mod catalog;
mod common;
mod graph;
mod lineage;
mod request;

// Re-export all public types
pub use catalog::{ColumnDescriptor, ObjectKind, RelationalObject, ANY_TYPE};
pub use common::{issue_codes, Issue, Severity};
pub use graph::{GraphEdge, GraphNode, LineageGraph, LineageReport, ReportMetadata};
pub use lineage::{ColumnRef, EdgeType, LineageEdge};
pub use request::{Dialect, ExtractionOptions};
