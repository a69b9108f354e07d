//! Common types shared between the catalog, lineage, and report layers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A non-fatal finding recorded during an extraction run.
///
/// Issues never abort a run. They are accumulated next to the lineage graph so
/// callers can see which objects contributed no lineage and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Severity level
    pub severity: Severity,

    /// Machine-readable issue code
    pub code: String,

    /// Human-readable message, prefixed with the object name when one is known
    pub message: String,

    /// Optional: catalog object the issue relates to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
}

impl Issue {
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            object_name: None,
        }
    }

    pub fn with_object(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }
}

/// Issue severity. Extraction failures are always warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

/// Machine-readable issue codes.
pub mod issue_codes {
    /// A view or procedure definition could not be tokenized.
    pub const OBJECT_PARSE_FAILURE: &str = "OBJECT_PARSE_FAILURE";
    /// A definition exceeded the configured size limit and was skipped.
    pub const INPUT_TOO_LARGE: &str = "INPUT_TOO_LARGE";
}
