//! Catalog snapshot and the resolution index derived from it.

use crate::error::CatalogError;
use crate::types::{ObjectKind, RelationalObject};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A snapshot of every relational object obtained from one connector call.
///
/// Object order is preserved as supplied; it drives node order in the graph
/// and parse order during extraction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    objects: Vec<RelationalObject>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate object names (case-insensitive).
    pub fn new(objects: Vec<RelationalObject>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(objects.len());
        for object in &objects {
            if !seen.insert(object.name.to_lowercase()) {
                return Err(CatalogError::DuplicateObject(object.name.clone()));
            }
        }
        Ok(Self { objects })
    }

    pub fn objects(&self) -> &[RelationalObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Look up an object by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&RelationalObject> {
        self.objects
            .iter()
            .find(|object| object.name.eq_ignore_ascii_case(name))
    }

    pub fn tables(&self) -> impl Iterator<Item = &RelationalObject> {
        self.of_kind(ObjectKind::Table)
    }

    pub fn views(&self) -> impl Iterator<Item = &RelationalObject> {
        self.of_kind(ObjectKind::View)
    }

    pub fn procedures(&self) -> impl Iterator<Item = &RelationalObject> {
        self.of_kind(ObjectKind::Procedure)
    }

    /// Views followed by procedures, each in catalog order.
    pub fn derived(&self) -> impl Iterator<Item = &RelationalObject> {
        self.views().chain(self.procedures())
    }

    /// Tables, then views, then procedures.
    pub fn grouped(&self) -> impl Iterator<Item = &RelationalObject> {
        self.tables().chain(self.derived())
    }

    fn of_kind(&self, kind: ObjectKind) -> impl Iterator<Item = &RelationalObject> {
        self.objects.iter().filter(move |object| object.kind == kind)
    }
}

/// Lower-cased object name to lower-cased column set, for tables and views.
///
/// Procedures are never part of the index: they can be lineage targets but
/// never an upstream source for another object.
#[derive(Debug, Clone, Default)]
pub struct ResolutionIndex {
    objects: HashMap<String, HashSet<String>>,
}

impl ResolutionIndex {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let objects = catalog
            .tables()
            .chain(catalog.views())
            .map(|object| {
                let columns = object
                    .columns
                    .iter()
                    .map(|column| column.name.to_lowercase())
                    .collect();
                (object.name.to_lowercase(), columns)
            })
            .collect();
        Self { objects }
    }

    pub fn contains_object(&self, name: &str) -> bool {
        self.objects.contains_key(&name.to_lowercase())
    }

    pub fn has_column(&self, object: &str, column: &str) -> bool {
        self.columns(object)
            .is_some_and(|columns| columns.contains(&column.to_lowercase()))
    }

    pub fn columns(&self, object: &str) -> Option<&HashSet<String>> {
        self.objects.get(&object.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<K, V, C> FromIterator<(K, V)> for ResolutionIndex
where
    K: AsRef<str>,
    V: IntoIterator<Item = C>,
    C: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let objects = iter
            .into_iter()
            .map(|(name, columns)| {
                let columns = columns
                    .into_iter()
                    .map(|column| column.as_ref().to_lowercase())
                    .collect();
                (name.as_ref().to_lowercase(), columns)
            })
            .collect();
        Self { objects }
    }
}
