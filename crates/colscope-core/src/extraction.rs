//! Extraction runs: catalog acquisition, per-object parsing, graph assembly.

use crate::catalog::{Catalog, ResolutionIndex};
use crate::connector::Connector;
use crate::error::{ExtractionError, ParseError, ParseErrorKind};
use crate::graph::{assemble_graph, build_report};
use crate::parser::LineageParser;
use crate::types::{
    issue_codes, ExtractionOptions, Issue, LineageEdge, LineageGraph, LineageReport,
    RelationalObject,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
#[cfg(feature = "tracing")]
use tracing::{debug, info_span};

/// Outcome of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub graph: LineageGraph,
    /// One entry per derived object whose definition could not be parsed
    pub warnings: Vec<Issue>,
}

impl ExtractionResult {
    /// Warnings as `"<object>: <description>"` strings.
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings
            .iter()
            .map(|issue| issue.message.clone())
            .collect()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Wraps the graph with run metadata, timestamped now.
    pub fn into_report(self, database: impl Into<String>) -> LineageReport {
        let warnings = self.warning_messages();
        build_report(self.graph, database.into(), warnings)
    }
}

/// Runs one extraction against `connector`.
///
/// Fails only when the connector cannot produce a catalog. Once the catalog is
/// available the run always completes; objects whose definitions cannot be
/// parsed are reported in [`ExtractionResult::warnings`].
///
/// A non-empty explicit lineage list from the connector is used as the whole
/// edge set and no definition is parsed.
pub fn run_extraction(
    connector: &dyn Connector,
    options: &ExtractionOptions,
) -> Result<ExtractionResult, ExtractionError> {
    #[cfg(feature = "tracing")]
    let _span = info_span!("run_extraction", source = %connector.label()).entered();

    connector.test_connection()?;
    let catalog = connector.get_all_objects()?;
    let explicit = connector.get_explicit_lineage()?;

    if !explicit.is_empty() {
        #[cfg(feature = "tracing")]
        debug!(
            edge_count = explicit.len(),
            "using explicit lineage, definitions not parsed"
        );
        return Ok(ExtractionResult {
            graph: assemble_graph(&catalog, explicit),
            warnings: Vec::new(),
        });
    }

    let (edges, warnings) = extract_edges(&catalog, options);
    Ok(ExtractionResult {
        graph: assemble_graph(&catalog, edges),
        warnings,
    })
}

/// Parses every view and procedure definition in `catalog`.
///
/// Objects are visited views first, then procedures, in catalog order, and
/// edges come back in that order regardless of how parsing is scheduled.
/// Objects without definition text are skipped.
pub fn extract_edges(
    catalog: &Catalog,
    options: &ExtractionOptions,
) -> (Vec<LineageEdge>, Vec<Issue>) {
    let index = ResolutionIndex::from_catalog(catalog);
    let parser = LineageParser::new(&index, options);

    let definitions: Vec<(&RelationalObject, &str)> = catalog
        .derived()
        .filter_map(|object| object.definition().map(|sql| (object, sql)))
        .collect();

    #[cfg(feature = "parallel")]
    let outcomes: Vec<Result<Vec<LineageEdge>, ParseError>> = {
        use rayon::prelude::*;
        definitions
            .par_iter()
            .map(|(object, sql)| parser.parse(&object.name, sql))
            .collect()
    };

    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<Result<Vec<LineageEdge>, ParseError>> = definitions
        .iter()
        .map(|(object, sql)| parser.parse(&object.name, sql))
        .collect();

    let mut edges = Vec::new();
    let mut warnings = Vec::new();

    for ((object, _), outcome) in definitions.iter().zip(outcomes) {
        match outcome {
            Ok(object_edges) => {
                #[cfg(feature = "tracing")]
                debug!(
                    object = %object.name,
                    kind = %object.kind,
                    edge_count = object_edges.len(),
                    "parsed definition"
                );
                edges.extend(object_edges);
            }
            Err(err) => {
                #[cfg(feature = "tracing")]
                debug!(object = %object.name, error = %err, "skipping unparsable definition");
                warnings.push(parse_failure(object, &err));
            }
        }
    }

    (edges, warnings)
}

fn parse_failure(object: &RelationalObject, err: &ParseError) -> Issue {
    let code = match err.kind {
        ParseErrorKind::InputTooLarge => issue_codes::INPUT_TOO_LARGE,
        ParseErrorKind::LexerError => issue_codes::OBJECT_PARSE_FAILURE,
    };

    Issue::warning(code, format!("{}: {}", object.name, err)).with_object(&object.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::types::{ColumnDescriptor, EdgeType, Severity};

    struct StaticConnector {
        objects: Vec<RelationalObject>,
        explicit: Vec<LineageEdge>,
    }

    impl Connector for StaticConnector {
        fn label(&self) -> String {
            "static".to_string()
        }

        fn get_all_objects(&self) -> Result<Catalog, CatalogError> {
            Catalog::new(self.objects.clone())
        }

        fn get_explicit_lineage(&self) -> Result<Vec<LineageEdge>, CatalogError> {
            Ok(self.explicit.clone())
        }
    }

    struct OfflineConnector;

    impl Connector for OfflineConnector {
        fn label(&self) -> String {
            "offline".to_string()
        }

        fn test_connection(&self) -> Result<(), CatalogError> {
            Err(CatalogError::Unavailable("connection refused".to_string()))
        }

        fn get_all_objects(&self) -> Result<Catalog, CatalogError> {
            unreachable!("catalog is never requested after a failed connection test")
        }
    }

    fn cols(names: &[&str]) -> Vec<ColumnDescriptor> {
        names.iter().map(ColumnDescriptor::inferred).collect()
    }

    fn objects() -> Vec<RelationalObject> {
        vec![
            RelationalObject::table("t", cols(&["a", "b"])),
            RelationalObject::view("v1", cols(&["a"]), Some("SELECT t.a FROM t".into())),
            RelationalObject::view("v_bad", cols(&["a"]), Some("SELECT 'a FROM t".into())),
            RelationalObject::view("v_empty", cols(&["a"]), None),
            RelationalObject::procedure("sp", cols(&["b"]), Some("SELECT t.b FROM t".into())),
            RelationalObject::view("v2", cols(&["a"]), Some("SELECT v1.a FROM v1".into())),
        ]
    }

    #[test]
    fn failures_are_isolated() {
        let connector = StaticConnector {
            objects: objects(),
            explicit: Vec::new(),
        };
        let result = run_extraction(&connector, &ExtractionOptions::default()).unwrap();

        let edges: Vec<_> = result
            .graph
            .edges
            .iter()
            .map(|e| (e.id.as_str(), e.edge.source().to_string(), e.edge.target().to_string()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("e0", "t.a".to_string(), "v1.a".to_string()),
                ("e1", "v1.a".to_string(), "v2.a".to_string()),
                ("e2", "t.b".to_string(), "sp.b".to_string()),
            ]
        );

        assert_eq!(result.warnings.len(), 1);
        let warning = &result.warnings[0];
        assert_eq!(warning.severity, Severity::Warning);
        assert_eq!(warning.code, issue_codes::OBJECT_PARSE_FAILURE);
        assert_eq!(warning.object_name.as_deref(), Some("v_bad"));
        assert!(result.warning_messages()[0].starts_with("v_bad: "));
    }

    #[test]
    fn explicit_lineage_short_circuits_parsing() {
        let explicit = LineageEdge::new("x", "c1", "v1", "c2", EdgeType::Direct);
        let connector = StaticConnector {
            objects: objects(),
            explicit: vec![explicit.clone()],
        };
        let result = run_extraction(&connector, &ExtractionOptions::default()).unwrap();

        assert_eq!(result.graph.edges.len(), 1);
        assert_eq!(result.graph.edges[0].edge, explicit);
        // v_bad is never parsed, so there is nothing to warn about
        assert!(!result.has_warnings());
        assert_eq!(result.graph.nodes.len(), 6);
    }

    #[test]
    fn unavailable_catalog_fails_the_run() {
        let err = run_extraction(&OfflineConnector, &ExtractionOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::CatalogUnavailable(CatalogError::Unavailable(_))
        ));
    }

    #[test]
    fn size_limit_is_reported_with_its_own_code() {
        let catalog = Catalog::new(objects()).unwrap();
        let options = ExtractionOptions::default().with_max_definition_bytes(17);
        let (edges, warnings) = extract_edges(&catalog, &options);

        // v1 and sp fit; v_bad fits but cannot be tokenized; v2 is too long
        assert_eq!(edges.len(), 2);
        let codes: Vec<_> = warnings
            .iter()
            .map(|w| (w.object_name.as_deref().unwrap(), w.code.as_str()))
            .collect();
        assert_eq!(
            codes,
            vec![
                ("v_bad", issue_codes::OBJECT_PARSE_FAILURE),
                ("v2", issue_codes::INPUT_TOO_LARGE),
            ]
        );
    }

    #[test]
    fn derived_objects_without_sql_have_no_edges() {
        let catalog = Catalog::new(vec![
            RelationalObject::table("t", cols(&["a"])),
            RelationalObject::view("v", cols(&["a"]), None),
            RelationalObject::procedure("sp", cols(&["a"]), Some("   ".into())),
        ])
        .unwrap();

        let (edges, warnings) = extract_edges(&catalog, &ExtractionOptions::default());
        assert!(edges.is_empty());
        assert!(warnings.is_empty());
    }

    #[test]
    fn report_carries_counts_and_warnings() {
        let connector = StaticConnector {
            objects: objects(),
            explicit: Vec::new(),
        };
        let report = run_extraction(&connector, &ExtractionOptions::default())
            .unwrap()
            .into_report("hr");

        assert_eq!(report.metadata.database, "hr");
        assert_eq!(report.metadata.node_count, 6);
        assert_eq!(report.metadata.edge_count, 3);
        assert_eq!(report.metadata.parse_warnings.len(), 1);
    }
}
