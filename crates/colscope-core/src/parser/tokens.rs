//! Tokenization and statement normalization.

use crate::error::ParseError;
use crate::types::Dialect;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, Tokenizer, Word};

/// Tokenize `sql` and drop trivia (whitespace and comments).
pub(crate) fn significant_tokens(sql: &str, dialect: Dialect) -> Result<Vec<Token>, ParseError> {
    let dialect = dialect.to_sqlparser_dialect();
    let mut tokenizer = Tokenizer::new(dialect.as_ref(), sql);
    let tokens = tokenizer.tokenize()?;

    Ok(tokens.into_iter().filter(|token| !is_trivia(token)).collect())
}

fn is_trivia(token: &Token) -> bool {
    matches!(token, Token::Whitespace(_) | Token::EOF)
}

pub(crate) fn is_keyword(token: Option<&Token>, keyword: Keyword) -> bool {
    matches!(token, Some(Token::Word(word)) if word.keyword == keyword)
}

pub(crate) fn as_word(token: Option<&Token>) -> Option<&Word> {
    match token {
        Some(Token::Word(word)) => Some(word),
        _ => None,
    }
}

/// Lower-cased identifier text of a word, without quotes.
pub(crate) fn ident(word: &Word) -> String {
    word.value.to_lowercase()
}

/// Index just past the parenthesised group opening at `open`.
///
/// Unbalanced input runs to the end of the slice.
pub(crate) fn skip_group(tokens: &[Token], open: usize) -> usize {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return idx + 1;
                }
            }
            _ => {}
        }
    }
    tokens.len()
}

/// Index just past a dotted name (`a`, `a.b`, `a.b.c`) starting at `start`,
/// together with its final segment.
pub(crate) fn dotted_name(tokens: &[Token], start: usize) -> Option<(usize, &Word)> {
    let mut last = as_word(tokens.get(start))?;
    let mut idx = start + 1;
    while matches!(tokens.get(idx), Some(Token::Period)) {
        let Some(next) = as_word(tokens.get(idx + 1)) else {
            break;
        };
        last = next;
        idx += 2;
    }
    Some((idx, last))
}

/// The first statement of a definition with any view prologue removed.
///
/// Strips a leading `CREATE [OR REPLACE | OR ALTER] VIEW <name> [(cols)] AS`
/// and cuts the token stream at the first top-level `;`.
pub(crate) fn statement_body(tokens: &[Token]) -> &[Token] {
    let start = view_prologue_end(tokens).unwrap_or(0);

    let mut depth = 0usize;
    let mut end = tokens.len();
    for (idx, token) in tokens.iter().enumerate().skip(start) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth = depth.saturating_sub(1),
            Token::SemiColon if depth == 0 => {
                end = idx;
                break;
            }
            _ => {}
        }
    }

    &tokens[start..end]
}

fn view_prologue_end(tokens: &[Token]) -> Option<usize> {
    if !is_keyword(tokens.first(), Keyword::CREATE) {
        return None;
    }

    let mut idx = 1;
    if is_keyword(tokens.get(idx), Keyword::OR)
        && (is_keyword(tokens.get(idx + 1), Keyword::REPLACE)
            || is_keyword(tokens.get(idx + 1), Keyword::ALTER))
    {
        idx += 2;
    }

    if !is_keyword(tokens.get(idx), Keyword::VIEW) {
        return None;
    }

    let (mut idx, _) = dotted_name(tokens, idx + 1)?;
    if matches!(tokens.get(idx), Some(Token::LParen)) {
        idx = skip_group(tokens, idx);
    }

    is_keyword(tokens.get(idx), Keyword::AS).then_some(idx + 1)
}
