//! Declarative JSON metadata documents.
//!
//! A document lists tables with their columns and, for views and stored
//! procedures, either the defining SQL or a hand-written `lineage` array:
//!
//! ```json
//! {
//!   "database_name": "hr",
//!   "tables": [{ "name": "employees", "columns": [{ "name": "salary", "data_type": "REAL" }] }],
//!   "views": [{ "name": "v_pay", "sql": "SELECT e.salary FROM employees e" }],
//!   "stored_procedures": [{ "name": "sp_report", "body_sql": "SELECT ..." }],
//!   "lineage": [{ "source_object": "employees", "source_column": "salary",
//!                 "target_object": "v_pay", "target_column": "salary" }]
//! }
//! ```

use super::Connector;
use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::parser::infer_output_columns;
use crate::types::{
    ColumnDescriptor, Dialect, EdgeType, LineageEdge, ObjectKind, RelationalObject, ANY_TYPE,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

const DEFAULT_LABEL: &str = "JSON Metadata";
const TEMPLATE_COMMENT: &str =
    "Provide either sql/body_sql for auto-parsing OR fill the lineage array for explicit mapping.";

/// Top-level metadata document. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetadataDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,

    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tables: Option<Vec<DocumentTable>>,

    #[serde(default)]
    pub views: Vec<DocumentView>,

    #[serde(default)]
    pub stored_procedures: Vec<DocumentProcedure>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineage: Option<Vec<DocumentEdge>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentTable {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<DocumentColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentView {
    pub name: String,
    #[serde(default)]
    pub sql: Option<String>,
    #[serde(default)]
    pub columns: Option<Vec<DocumentColumn>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentProcedure {
    pub name: String,
    #[serde(default)]
    pub body_sql: Option<String>,
    #[serde(default)]
    pub columns: Option<Vec<DocumentColumn>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentColumn {
    pub name: String,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub is_pk: bool,
}

/// A hand-written edge. `source_node`/`target_node` are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentEdge {
    #[serde(default, alias = "source_node")]
    pub source_object: String,
    #[serde(default)]
    pub source_column: String,
    #[serde(default, alias = "target_node")]
    pub target_object: String,
    #[serde(default)]
    pub target_column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
}

impl DocumentColumn {
    fn to_descriptor(&self) -> ColumnDescriptor {
        let data_type = self.data_type.as_deref().unwrap_or(ANY_TYPE);
        ColumnDescriptor::new(&self.name, data_type, self.is_pk)
    }

    fn from_descriptor(column: &ColumnDescriptor) -> Self {
        Self {
            name: column.name.clone(),
            data_type: Some(column.data_type.clone()),
            is_pk: column.is_primary_key,
        }
    }
}

impl DocumentEdge {
    fn to_edge(&self) -> LineageEdge {
        LineageEdge::new(
            &self.source_object,
            self.source_column.to_lowercase(),
            &self.target_object,
            self.target_column.to_lowercase(),
            self.edge_type
                .as_deref()
                .map(EdgeType::from_label)
                .unwrap_or_default(),
        )
    }
}

/// Connector over a [`MetadataDocument`].
#[derive(Debug, Clone)]
pub struct DocumentConnector {
    document: MetadataDocument,
    label: Option<String>,
    dialect: Dialect,
}

impl DocumentConnector {
    pub fn new(document: MetadataDocument) -> Self {
        Self {
            document,
            label: None,
            dialect: Dialect::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_reader(reader)?))
    }

    /// Overrides the document's `database_name` as the report label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        let trimmed = label.trim();
        if !trimmed.is_empty() {
            self.label = Some(trimmed.to_string());
        }
        self
    }

    /// Dialect used to infer column lists from definitions.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn document(&self) -> &MetadataDocument {
        &self.document
    }

    /// A fill-in document describing `catalog`: definitions blanked, columns
    /// kept, and one example explicit edge.
    pub fn template(catalog: &Catalog, database_name: impl Into<String>) -> MetadataDocument {
        let columns = |object: &RelationalObject| -> Vec<DocumentColumn> {
            object
                .columns
                .iter()
                .map(DocumentColumn::from_descriptor)
                .collect()
        };

        MetadataDocument {
            database_name: Some(database_name.into()),
            comment: Some(TEMPLATE_COMMENT.to_string()),
            tables: Some(
                catalog
                    .tables()
                    .map(|table| DocumentTable {
                        name: table.name.clone(),
                        columns: columns(table),
                    })
                    .collect(),
            ),
            views: catalog
                .views()
                .map(|view| DocumentView {
                    name: view.name.clone(),
                    sql: Some(String::new()),
                    columns: Some(columns(view)),
                })
                .collect(),
            stored_procedures: catalog
                .procedures()
                .map(|procedure| DocumentProcedure {
                    name: procedure.name.clone(),
                    body_sql: Some(String::new()),
                    columns: Some(columns(procedure)),
                })
                .collect(),
            lineage: Some(vec![DocumentEdge {
                source_object: "table_name".to_string(),
                source_column: "col_name".to_string(),
                target_object: "view_name".to_string(),
                target_column: "col_alias".to_string(),
                edge_type: Some(EdgeType::Direct.to_string()),
            }]),
        }
    }

    fn derived_object(
        &self,
        kind: ObjectKind,
        name: &str,
        sql: Option<&String>,
        columns: Option<&Vec<DocumentColumn>>,
    ) -> RelationalObject {
        let sql = sql.cloned();
        let columns = match columns {
            Some(columns) if !columns.is_empty() => {
                columns.iter().map(DocumentColumn::to_descriptor).collect()
            }
            _ => infer_output_columns(sql.as_deref().unwrap_or_default(), self.dialect),
        };

        match kind {
            ObjectKind::Procedure => RelationalObject::procedure(name, columns, sql),
            _ => RelationalObject::view(name, columns, sql),
        }
    }
}

impl Connector for DocumentConnector {
    fn label(&self) -> String {
        self.label
            .clone()
            .or_else(|| {
                self.document
                    .database_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| DEFAULT_LABEL.to_string())
    }

    fn test_connection(&self) -> Result<(), CatalogError> {
        if self.document.tables.is_none() && self.document.lineage.is_none() {
            return Err(CatalogError::InvalidDocument(
                "document must contain \"tables\" and/or \"lineage\" keys".to_string(),
            ));
        }
        Ok(())
    }

    fn get_all_objects(&self) -> Result<Catalog, CatalogError> {
        let tables = self.document.tables.iter().flatten().map(|table| {
            let columns = table.columns.iter().map(DocumentColumn::to_descriptor).collect();
            RelationalObject::table(&table.name, columns)
        });
        let views = self.document.views.iter().map(|view| {
            self.derived_object(
                ObjectKind::View,
                &view.name,
                view.sql.as_ref(),
                view.columns.as_ref(),
            )
        });
        let procedures = self.document.stored_procedures.iter().map(|procedure| {
            self.derived_object(
                ObjectKind::Procedure,
                &procedure.name,
                procedure.body_sql.as_ref(),
                procedure.columns.as_ref(),
            )
        });

        Catalog::new(tables.chain(views).chain(procedures).collect())
    }

    fn get_explicit_lineage(&self) -> Result<Vec<LineageEdge>, CatalogError> {
        Ok(self
            .document
            .lineage
            .iter()
            .flatten()
            .map(DocumentEdge::to_edge)
            .collect())
    }
}
