//! Catalog model: relational objects and their ordered columns.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placeholder type for columns whose type is not independently known.
pub const ANY_TYPE: &str = "ANY";

/// A single column of a table, view, or procedure result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Column name, lower-cased
    pub name: String,

    /// Declared data type, or `ANY` when unknown
    pub data_type: String,

    /// Whether the column is part of the primary key
    #[serde(default)]
    pub is_primary_key: bool,
}

impl ColumnDescriptor {
    /// Create a column, lower-casing its name.
    pub fn new(name: impl AsRef<str>, data_type: impl Into<String>, is_primary_key: bool) -> Self {
        Self {
            name: name.as_ref().to_lowercase(),
            data_type: data_type.into(),
            is_primary_key,
        }
    }

    /// Create a column whose type could not be determined from its source.
    pub fn inferred(name: impl AsRef<str>) -> Self {
        Self::new(name, ANY_TYPE, false)
    }
}

/// The kind of a relational object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Table,
    View,
    Procedure,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::View => "view",
            Self::Procedure => "procedure",
        }
    }

    /// Views and procedures are derived from SQL text; tables are not.
    pub fn is_derived(&self) -> bool {
        !matches!(self, Self::Table)
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table, view, or procedure known to a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationalObject {
    /// Object name, unique within its catalog
    pub name: String,

    /// Object kind
    pub kind: ObjectKind,

    /// Columns in declaration or result-set order
    pub columns: Vec<ColumnDescriptor>,

    /// Defining SQL for views and procedures; always absent for tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_sql: Option<String>,
}

impl RelationalObject {
    /// Create a table. Tables never carry definition SQL.
    pub fn table(name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Table,
            columns,
            definition_sql: None,
        }
    }

    /// Create a view with optional defining SQL.
    pub fn view(
        name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
        definition_sql: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::View,
            columns,
            definition_sql,
        }
    }

    /// Create a procedure with its output columns and optional body SQL.
    pub fn procedure(
        name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
        definition_sql: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Procedure,
            columns,
            definition_sql,
        }
    }

    /// The definition text, if present and not blank.
    pub fn definition(&self) -> Option<&str> {
        self.definition_sql
            .as_deref()
            .filter(|sql| !sql.trim().is_empty())
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}
