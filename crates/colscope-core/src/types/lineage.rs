//! Lineage edge types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a target column's value is derived from a source column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Plain copy of the source value
    #[default]
    Direct,
    /// Scalar transformation (ROUND, COALESCE, CAST, arithmetic, ...)
    Computed,
    /// Aggregate function (COUNT, SUM, AVG, MIN, MAX)
    Aggregate,
    /// String concatenation with `||`
    Concat,
    /// Conditional CASE expression
    Case,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Computed => "computed",
            Self::Aggregate => "aggregate",
            Self::Concat => "concat",
            Self::Case => "case",
        }
    }

    /// Parse a hand-supplied edge type.
    ///
    /// Blank or unrecognised values fall back to [`EdgeType::Direct`], the same
    /// default used when the field is missing entirely.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "computed" => Self::Computed,
            "aggregate" => Self::Aggregate,
            "concat" => Self::Concat,
            "case" => Self::Case,
            _ => Self::Direct,
        }
    }
}

impl std::fmt::Display for EdgeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed column-level lineage edge: `target_column` derives from `source_column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineageEdge {
    pub source_object: String,
    pub source_column: String,
    pub target_object: String,
    pub target_column: String,
    #[serde(default)]
    pub edge_type: EdgeType,
}

impl LineageEdge {
    pub fn new(
        source_object: impl Into<String>,
        source_column: impl Into<String>,
        target_object: impl Into<String>,
        target_column: impl Into<String>,
        edge_type: EdgeType,
    ) -> Self {
        Self {
            source_object: source_object.into(),
            source_column: source_column.into(),
            target_object: target_object.into(),
            target_column: target_column.into(),
            edge_type,
        }
    }

    pub fn source(&self) -> ColumnRef {
        ColumnRef::new(&self.source_object, &self.source_column)
    }

    pub fn target(&self) -> ColumnRef {
        ColumnRef::new(&self.target_object, &self.target_column)
    }
}

/// A fully qualified column: `object.column`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRef {
    pub object: String,
    pub column: String,
}

impl ColumnRef {
    pub fn new(object: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            column: column.into(),
        }
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.object, self.column)
    }
}
