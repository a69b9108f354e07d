//! Alias resolution for `FROM` and `JOIN` sources.

use super::tokens::{as_word, dotted_name, ident, is_keyword};
use crate::catalog::ResolutionIndex;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::Token;
use std::collections::HashMap;

/// Keywords that can directly follow a table reference and therefore never
/// act as its alias.
const SOURCE_TERMINATORS: &[Keyword] = &[
    Keyword::ON,
    Keyword::USING,
    Keyword::WHERE,
    Keyword::GROUP,
    Keyword::HAVING,
    Keyword::ORDER,
    Keyword::LIMIT,
    Keyword::OFFSET,
    Keyword::FETCH,
    Keyword::UNION,
    Keyword::EXCEPT,
    Keyword::INTERSECT,
    Keyword::JOIN,
    Keyword::INNER,
    Keyword::LEFT,
    Keyword::RIGHT,
    Keyword::FULL,
    Keyword::CROSS,
    Keyword::OUTER,
    Keyword::NATURAL,
    Keyword::WINDOW,
    Keyword::QUALIFY,
    Keyword::SELECT,
    Keyword::FROM,
    Keyword::SET,
    Keyword::WITH,
    Keyword::FOR,
    Keyword::END,
];

/// Alias to object mapping for one statement.
///
/// Only sources that exist in the resolution index are registered; a later
/// binding of the same alias replaces an earlier one.
#[derive(Debug, Default)]
pub(crate) struct AliasMap {
    aliases: HashMap<String, String>,
}

impl AliasMap {
    pub(crate) fn build(tokens: &[Token], index: &ResolutionIndex) -> Self {
        let mut map = Self::default();

        for (idx, token) in tokens.iter().enumerate() {
            let Token::Word(word) = token else {
                continue;
            };
            match word.keyword {
                Keyword::FROM => map.register_list(tokens, idx + 1, index),
                Keyword::JOIN => {
                    map.register_source(tokens, idx + 1, index);
                }
                _ => {}
            }
        }

        map
    }

    pub(crate) fn resolve(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// The registered object when every alias points at the same one.
    pub(crate) fn sole_source(&self) -> Option<&str> {
        let mut objects = self.aliases.values();
        let first = objects.next()?;
        objects
            .all(|object| object == first)
            .then_some(first.as_str())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.aliases.len()
    }

    /// `FROM a x, b y, ...`
    fn register_list(&mut self, tokens: &[Token], start: usize, index: &ResolutionIndex) {
        let mut pos = start;
        while let Some(next) = self.register_source(tokens, pos, index) {
            if !matches!(tokens.get(next), Some(Token::Comma)) {
                break;
            }
            pos = next + 1;
        }
    }

    /// Registers the source starting at `start` and returns the index just
    /// past it. Derived tables are not sources and stop the scan.
    fn register_source(
        &mut self,
        tokens: &[Token],
        start: usize,
        index: &ResolutionIndex,
    ) -> Option<usize> {
        let (mut pos, name_word) = dotted_name(tokens, start)?;
        if name_word.quote_style.is_none() && is_terminator(name_word.keyword) {
            return None;
        }
        let name = ident(name_word);

        let alias = if is_keyword(tokens.get(pos), Keyword::AS) {
            match as_word(tokens.get(pos + 1)) {
                Some(word) => {
                    pos += 2;
                    ident(word)
                }
                None => name.clone(),
            }
        } else {
            match as_word(tokens.get(pos)) {
                Some(word) if word.quote_style.is_some() || !is_terminator(word.keyword) => {
                    pos += 1;
                    ident(word)
                }
                _ => name.clone(),
            }
        };

        if index.contains_object(&name) {
            self.aliases.insert(alias, name);
        }

        Some(pos)
    }
}

fn is_terminator(keyword: Keyword) -> bool {
    SOURCE_TERMINATORS.contains(&keyword)
}
