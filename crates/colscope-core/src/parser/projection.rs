//! Select-list scanning: output aliases, expression classes and qualified
//! column references.

use super::tokens::{as_word, ident, is_keyword, skip_group};
use crate::types::EdgeType;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, Word};

const UNKNOWN_ALIAS: &str = "unknown";

const AGGREGATE_FUNCTIONS: &[&str] = &["COUNT", "SUM", "AVG", "MIN", "MAX"];
const COMPUTED_FUNCTIONS: &[&str] = &["ROUND", "COALESCE", "NVL", "CAST", "ABS"];

/// One output column of the projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OutputColumn {
    pub alias: String,
    pub edge_type: EdgeType,
    /// `(alias, column)` pairs in order of appearance.
    pub references: Vec<(String, String)>,
    /// Unqualified identifiers that are not function calls.
    pub bare_references: Vec<String>,
}

/// Output columns of the first `SELECT ... FROM` span.
///
/// Returns an empty list when there is no select list or it has no `FROM`.
pub(crate) fn output_columns(tokens: &[Token]) -> Vec<OutputColumn> {
    let Some(select_list) = select_list(tokens) else {
        return Vec::new();
    };

    split_top_level(select_list)
        .into_iter()
        .filter(|expr| !expr.is_empty() && !is_wildcard(expr))
        .map(|expr| {
            let (alias, body) = output_alias(expr);
            let (references, bare_references) = column_references(body);
            OutputColumn {
                alias,
                edge_type: classify(body),
                references,
                bare_references,
            }
        })
        .collect()
}

/// Output column names only, in select-list order.
pub(crate) fn output_aliases(tokens: &[Token]) -> Vec<String> {
    let Some(select_list) = select_list(tokens) else {
        return Vec::new();
    };

    split_top_level(select_list)
        .into_iter()
        .filter(|expr| !expr.is_empty() && !is_wildcard(expr))
        .map(|expr| output_alias(expr).0)
        .collect()
}

fn select_list(tokens: &[Token]) -> Option<&[Token]> {
    let select_idx = tokens
        .iter()
        .position(|token| is_keyword(Some(token), Keyword::SELECT))?;

    let start = skip_select_modifiers(tokens, select_idx + 1);

    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(start) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                // The enclosing group closed before any FROM.
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            }
            Token::Word(word) if depth == 0 && word.keyword == Keyword::FROM => {
                return Some(&tokens[start..idx]);
            }
            _ => {}
        }
    }

    None
}

fn skip_select_modifiers(tokens: &[Token], mut pos: usize) -> usize {
    if is_keyword(tokens.get(pos), Keyword::DISTINCT) || is_keyword(tokens.get(pos), Keyword::ALL)
    {
        pos += 1;
    }

    if is_keyword(tokens.get(pos), Keyword::TOP) {
        pos += 1;
        if matches!(tokens.get(pos), Some(Token::LParen)) {
            pos = skip_group(tokens, pos);
        } else if tokens.get(pos).is_some() {
            pos += 1;
        }
    }

    pos
}

fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (idx, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            Token::Comma if depth == 0 => {
                parts.push(&tokens[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);

    parts
}

/// `*`, `t.*` and `s.t.*`.
fn is_wildcard(expr: &[Token]) -> bool {
    let Some((last, rest)) = expr.split_last() else {
        return false;
    };
    if !matches!(last, Token::Mul) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }

    rest.len() % 2 == 0
        && rest.chunks(2).all(|pair| {
            matches!(pair[0], Token::Word(_)) && matches!(pair[1], Token::Period)
        })
}

/// Splits `expr [AS alias]` into the output name and the expression body.
fn output_alias(expr: &[Token]) -> (String, &[Token]) {
    if let [body @ .., as_token, Token::Word(alias)] = expr {
        if is_keyword(Some(as_token), Keyword::AS) {
            return (ident(alias), body);
        }
    }

    let alias = expr
        .iter()
        .rev()
        .find_map(|token| as_word(Some(token)))
        .map(ident)
        .unwrap_or_else(|| UNKNOWN_ALIAS.to_string());

    (alias, expr)
}

fn classify(expr: &[Token]) -> EdgeType {
    if calls_any(expr, AGGREGATE_FUNCTIONS) {
        EdgeType::Aggregate
    } else if expr
        .iter()
        .any(|token| is_keyword(Some(token), Keyword::CASE))
    {
        EdgeType::Case
    } else if expr.iter().any(|token| matches!(token, Token::StringConcat)) {
        EdgeType::Concat
    } else if calls_any(expr, COMPUTED_FUNCTIONS) {
        EdgeType::Computed
    } else {
        EdgeType::Direct
    }
}

fn calls_any(expr: &[Token], functions: &[&str]) -> bool {
    expr.windows(2).any(|pair| match pair {
        [Token::Word(word), Token::LParen] => is_function_name(word, functions),
        _ => false,
    })
}

fn is_function_name(word: &Word, functions: &[&str]) -> bool {
    word.quote_style.is_none()
        && functions
            .iter()
            .any(|name| word.value.eq_ignore_ascii_case(name))
}

/// Every dotted reference in `expr`, reduced to its last two parts, plus
/// every undotted identifier.
///
/// Names directly followed by `(` are function calls and are skipped.
fn column_references(expr: &[Token]) -> (Vec<(String, String)>, Vec<String>) {
    let mut references = Vec::new();
    let mut bare = Vec::new();
    let mut idx = 0;

    while idx < expr.len() {
        let Token::Word(first) = &expr[idx] else {
            idx += 1;
            continue;
        };

        let mut parts = vec![first];
        let mut end = idx + 1;
        while let (Some(Token::Period), Some(Token::Word(next))) =
            (expr.get(end), expr.get(end + 1))
        {
            parts.push(next);
            end += 2;
        }

        let is_call = matches!(expr.get(end), Some(Token::LParen));
        match parts.as_slice() {
            _ if is_call => {}
            [column] => bare.push(ident(column)),
            [.., alias, column] => references.push((ident(alias), ident(column))),
            [] => {}
        }

        idx = end;
    }

    (references, bare)
}
