pub mod catalog;
pub mod connector;
pub mod error;
pub mod extraction;
pub mod graph;
pub mod parser;
pub mod types;

// Re-export main types and functions
pub use catalog::{Catalog, ResolutionIndex};
pub use connector::{Connector, DocumentConnector, MetadataDocument};
pub use error::{CatalogError, ExtractionError, ParseError, ParseErrorKind, Position};
pub use extraction::{extract_edges, run_extraction, ExtractionResult};
pub use graph::{assemble_graph, build_report, build_report_at};
pub use parser::{infer_output_columns, parse_lineage, LineageParser};

// Re-export types explicitly
pub use types::{
    // Issue codes
    issue_codes,
    // Catalog types
    ColumnDescriptor,
    // Lineage types
    ColumnRef,
    // Request types
    Dialect,
    EdgeType,
    ExtractionOptions,
    // Graph types
    GraphEdge,
    GraphNode,
    Issue,
    LineageEdge,
    LineageGraph,
    LineageReport,
    ObjectKind,
    RelationalObject,
    ReportMetadata,
    Severity,
    ANY_TYPE,
};
