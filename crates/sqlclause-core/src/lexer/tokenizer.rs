//! Whitespace tokenizer.

use tracing::trace;

use super::{RuleTable, Token};
use crate::error::{Error, Result};

/// A lexer that splits a statement on single spaces and classifies each
/// non-empty fragment.
///
/// Fragments are not split further: `SUM(height)` and `id,` are single
/// identifier tokens because identifier rules match by prefix.
pub struct Lexer<'a> {
    /// Remaining fragments of the input.
    fragments: core::str::Split<'a, char>,
    /// The table used to resolve and classify fragments.
    rules: &'a RuleTable,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `input` using the standard rule table.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_rules(input, RuleTable::standard())
    }

    /// Creates a lexer over `input` using a custom rule table.
    #[must_use]
    pub fn with_rules(input: &'a str, rules: &'a RuleTable) -> Self {
        Self {
            fragments: input.split(' '),
            rules,
        }
    }

    /// Tokenizes the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Classification`] for the first fragment no kind admits.
    pub fn tokenize(self) -> Result<Vec<Token>> {
        self.collect()
    }

    fn classify_fragment(&self, fragment: &str) -> Result<Token> {
        let kind = self
            .rules
            .resolve(fragment)
            .ok_or_else(|| Error::Classification {
                value: fragment.to_string(),
            })?;
        let properties = self.rules.properties_for(kind, fragment);
        trace!(fragment, %kind, "classified fragment");
        Ok(Token::from_parts(kind, fragment.to_string(), properties))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        let fragment = self.fragments.by_ref().find(|f| !f.is_empty())?;
        Some(self.classify_fragment(fragment))
    }
}

/// Tokenizes `input` with the standard rule table.
///
/// # Errors
///
/// Returns [`Error::Classification`] for the first fragment no kind admits.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}
