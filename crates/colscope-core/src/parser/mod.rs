//! Column-level lineage extraction from view and procedure definitions.
//!
//! The parser is a bounded token scanner rather than a full SQL grammar. It
//! looks at the first `SELECT ... FROM` of a definition, resolves `alias.column`
//! references against the `FROM`/`JOIN` sources it knows about, and drops
//! everything it cannot resolve. Unqualified columns are only resolved when
//! a single known object is in scope.

mod alias;
mod projection;
mod tokens;

use crate::catalog::ResolutionIndex;
use crate::error::ParseError;
use crate::types::{ColumnDescriptor, Dialect, ExtractionOptions, LineageEdge};
use alias::AliasMap;
use std::collections::HashSet;

/// Lineage parser bound to one resolution index.
#[derive(Debug, Clone, Copy)]
pub struct LineageParser<'a> {
    index: &'a ResolutionIndex,
    options: &'a ExtractionOptions,
}

impl<'a> LineageParser<'a> {
    pub fn new(index: &'a ResolutionIndex, options: &'a ExtractionOptions) -> Self {
        Self { index, options }
    }

    /// Returns the edges that terminate at `target`.
    ///
    /// Output columns with no resolvable reference produce no edges. The only
    /// failures are definitions the tokenizer rejects and definitions above
    /// the configured size limit.
    pub fn parse(&self, target: &str, sql: &str) -> Result<Vec<LineageEdge>, ParseError> {
        if let Some(limit) = self.options.max_definition_bytes {
            if sql.len() > limit {
                return Err(ParseError::input_too_large(sql.len(), limit));
            }
        }

        let tokens = tokens::significant_tokens(sql, self.options.dialect)?;
        let statement = tokens::statement_body(&tokens);
        let aliases = AliasMap::build(statement, self.index);
        let sole_source = aliases.sole_source();
        let target = target.to_lowercase();

        let mut seen: HashSet<(String, String, String)> = HashSet::new();
        let mut edges = Vec::new();

        for column in projection::output_columns(statement) {
            let qualified = column
                .references
                .iter()
                .filter_map(|(alias, name)| Some((aliases.resolve(alias)?, name.as_str())));
            let bare = column
                .bare_references
                .iter()
                .filter_map(|name| Some((sole_source?, name.as_str())));

            let mut sources: Vec<(&str, &str)> = Vec::new();
            for (object, name) in qualified.chain(bare) {
                if self.index.has_column(object, name) && !sources.contains(&(object, name)) {
                    sources.push((object, name));
                }
            }

            for (object, name) in sources {
                let key = (object.to_string(), name.to_string(), column.alias.clone());
                if seen.insert(key) {
                    edges.push(LineageEdge::new(
                        object,
                        name,
                        &target,
                        &column.alias,
                        column.edge_type,
                    ));
                }
            }
        }

        Ok(edges)
    }
}

/// Parses one definition without constructing a [`LineageParser`].
pub fn parse_lineage(
    target: &str,
    sql: &str,
    index: &ResolutionIndex,
    options: &ExtractionOptions,
) -> Result<Vec<LineageEdge>, ParseError> {
    LineageParser::new(index, options).parse(target, sql)
}

/// Output columns of a definition, typed as `ANY`.
///
/// Connectors use this when a view or procedure arrives without a column
/// list. Untokenizable input yields no columns.
pub fn infer_output_columns(sql: &str, dialect: Dialect) -> Vec<ColumnDescriptor> {
    let Ok(tokens) = tokens::significant_tokens(sql, dialect) else {
        return Vec::new();
    };

    projection::output_aliases(tokens::statement_body(&tokens))
        .into_iter()
        .map(ColumnDescriptor::inferred)
        .collect()
}
