//! Sources of catalog metadata.
//!
//! A [`Connector`] hands the extractor a [`Catalog`] snapshot and, optionally,
//! a hand-maintained edge list. The core never performs I/O itself; live
//! database connectors live in the CLI crate.

mod document;

pub use document::{
    DocumentColumn, DocumentConnector, DocumentEdge, DocumentProcedure, DocumentTable, DocumentView,
    MetadataDocument,
};

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::types::LineageEdge;

/// A source that can describe every relational object it knows about.
///
/// Implementations read from a backing store (a database's system catalogs,
/// a metadata document) and normalize column names to lower case.
pub trait Connector {
    /// Human-readable name of the source, used in reports.
    fn label(&self) -> String;

    /// Checks that the source is reachable and well-formed.
    fn test_connection(&self) -> Result<(), CatalogError> {
        Ok(())
    }

    /// Every table, view and procedure, with definition text where available.
    fn get_all_objects(&self) -> Result<Catalog, CatalogError>;

    /// Hand-supplied edges. A non-empty list replaces SQL parsing entirely.
    fn get_explicit_lineage(&self) -> Result<Vec<LineageEdge>, CatalogError> {
        Ok(Vec::new())
    }
}
