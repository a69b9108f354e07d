//! Options controlling an extraction run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// SQL dialect used to tokenize view and procedure definitions.
///
/// The dialect only affects lexing (quote characters, comment styles); the
/// lineage scan itself is dialect-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Generic,
    Ansi,
    Bigquery,
    Duckdb,
    Mssql,
    Mysql,
    Postgres,
    Snowflake,
    Sqlite,
}

impl Dialect {
    pub fn to_sqlparser_dialect(&self) -> Box<dyn sqlparser::dialect::Dialect> {
        use sqlparser::dialect::{
            AnsiDialect, BigQueryDialect, DuckDbDialect, GenericDialect, MsSqlDialect,
            MySqlDialect, PostgreSqlDialect, SQLiteDialect, SnowflakeDialect,
        };
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::Ansi => Box::new(AnsiDialect {}),
            Self::Bigquery => Box::new(BigQueryDialect {}),
            Self::Duckdb => Box::new(DuckDbDialect {}),
            Self::Mssql => Box::new(MsSqlDialect {}),
            Self::Mysql => Box::new(MySqlDialect {}),
            Self::Postgres => Box::new(PostgreSqlDialect {}),
            Self::Snowflake => Box::new(SnowflakeDialect {}),
            Self::Sqlite => Box::new(SQLiteDialect {}),
        }
    }
}

/// Options controlling an extraction run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOptions {
    /// Dialect used to tokenize definitions
    #[serde(default)]
    pub dialect: Dialect,

    /// Definitions longer than this many bytes are rejected as parse failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_definition_bytes: Option<usize>,
}

impl ExtractionOptions {
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_max_definition_bytes(mut self, limit: usize) -> Self {
        self.max_definition_bytes = Some(limit);
        self
    }
}
