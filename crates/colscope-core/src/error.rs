//! Error types for catalog acquisition and definition parsing.
//!
//! # Error Handling Strategy
//!
//! This crate uses three complementary error types:
//!
//! - [`CatalogError`]: the connector could not produce a catalog. This is the
//!   only condition that aborts an extraction run, surfaced as
//!   [`ExtractionError::CatalogUnavailable`].
//!
//! - [`ParseError`]: a single view or procedure definition could not be
//!   tokenized. The extractor converts it into a [`crate::types::Issue`] keyed by
//!   object name and moves on to the next object.
//!
//! - Unresolved references (unknown aliases, columns outside the catalog) are not
//!   errors at all. They are dropped silently during parsing.

use sqlparser::tokenizer::TokenizerError;
use std::fmt;
use thiserror::Error;

/// Error encountered while parsing a single definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Location where the error occurred, if available.
    pub position: Option<Position>,
    /// The specific category of parse error.
    pub kind: ParseErrorKind,
}

/// Position information for a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

/// Category of parse error for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorKind {
    /// The definition could not be split into tokens.
    #[default]
    LexerError,
    /// The definition exceeds the configured size limit.
    InputTooLarge,
}

impl ParseError {
    /// Creates a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            kind: ParseErrorKind::LexerError,
        }
    }

    /// Creates a parse error with position information.
    pub fn with_position(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            position: Some(Position { line, column }),
            kind: ParseErrorKind::LexerError,
        }
    }

    /// Sets the error kind.
    pub fn with_kind(mut self, kind: ParseErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub(crate) fn input_too_large(len: usize, limit: usize) -> Self {
        Self::new(format!(
            "definition is {len} bytes, exceeding the {limit} byte limit"
        ))
        .with_kind(ParseErrorKind::InputTooLarge)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error")?;

        if let Some(pos) = self.position {
            write!(f, " at line {}, column {}", pos.line, pos.column)?;
        }

        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<TokenizerError> for ParseError {
    fn from(err: TokenizerError) -> Self {
        let line = err.location.line as usize;
        let column = err.location.column as usize;

        // sqlparser reports line 0 when it has no location to offer
        if line == 0 {
            Self::new(err.message)
        } else {
            Self::with_position(err.message, line, column)
        }
    }
}

/// The connector could not produce a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Connectivity, authorization, or metadata query failure.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// Two objects in one catalog share a name.
    #[error("duplicate object name in catalog: {0}")]
    DuplicateObject(String),

    /// A metadata document does not have the expected shape.
    #[error("invalid metadata document: {0}")]
    InvalidDocument(String),

    /// A metadata document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a whole extraction run.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error(transparent)]
    CatalogUnavailable(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlparser::dialect::GenericDialect;
    use sqlparser::tokenizer::Tokenizer;

    #[test]
    fn test_display_with_position() {
        let err = ParseError::with_position("Unterminated string literal", 10, 5);
        assert_eq!(
            err.to_string(),
            "Parse error at line 10, column 5: Unterminated string literal"
        );
    }

    #[test]
    fn test_display_without_position() {
        let err = ParseError::new("Bad input");
        assert_eq!(err.to_string(), "Parse error: Bad input");
    }

    #[test]
    fn test_from_tokenizer_error_keeps_location() {
        let dialect = GenericDialect {};
        let err = Tokenizer::new(&dialect, "SELECT 'open")
            .tokenize()
            .expect_err("unterminated literal");
        let parse_error = ParseError::from(err);

        assert_eq!(parse_error.kind, ParseErrorKind::LexerError);
        assert!(parse_error.position.is_some());
    }

    #[test]
    fn test_input_too_large_kind() {
        let err = ParseError::input_too_large(2048, 1024);
        assert_eq!(err.kind, ParseErrorKind::InputTooLarge);
        assert!(err.message.contains("1024"));
    }

    #[test]
    fn test_catalog_error_is_transparent_in_extraction_error() {
        let err: ExtractionError = CatalogError::Unavailable("connection refused".into()).into();
        assert_eq!(err.to_string(), "catalog unavailable: connection refused");
    }

    #[test]
    fn test_error_trait() {
        let err = ParseError::new("Test error");
        let _: &dyn std::error::Error = &err;
    }
}
