//! The classified token value object.

use core::fmt;

use super::{Properties, RuleTable, TokenKind};
use crate::error::{Error, Result};

/// A classified lexical unit.
///
/// The `properties` are always derived from the current `value`: every
/// mutation goes through [`Token::set_value`], which recomputes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    value: String,
    properties: Properties,
    validated: bool,
}

impl Token {
    /// Creates a token, validating `value` against the rule for `kind` only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenConstruction`] if the value is empty or the
    /// kind's rule rejects it.
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let properties = Self::check(RuleTable::standard(), kind, &value)?;
        Ok(Self {
            kind,
            value,
            properties,
            validated: true,
        })
    }

    /// Creates a token without rejecting the value.
    ///
    /// Properties are still computed, so a merged `GROUP BY` keyword reports
    /// `keyword = true` while an arbitrary phrase reports `false`.
    #[must_use]
    pub fn unchecked(kind: TokenKind, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            kind,
            properties: RuleTable::standard().properties_for(kind, &value),
            value,
            validated: false,
        }
    }

    /// Resolves the kind of `value` against the standard table and builds
    /// the matching token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Classification`] if no kind admits the value.
    pub fn classify(value: &str) -> Result<Self> {
        let kind = Self::kind_of(value)?;
        Self::new(kind, value)
    }

    /// Returns the first kind, in resolution order, that admits `value`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Classification`] if no kind admits the value.
    pub fn kind_of(value: &str) -> Result<TokenKind> {
        RuleTable::standard()
            .resolve(value)
            .ok_or_else(|| Error::Classification {
                value: value.to_string(),
            })
    }

    pub(crate) const fn from_parts(kind: TokenKind, value: String, properties: Properties) -> Self {
        Self {
            kind,
            value,
            properties,
            validated: true,
        }
    }

    fn check(rules: &RuleTable, kind: TokenKind, value: &str) -> Result<Properties> {
        if value.is_empty() {
            return Err(Error::TokenConstruction {
                kind,
                value: String::new(),
                reason: "value cannot be empty".to_string(),
            });
        }
        let properties = rules.properties_for(kind, value);
        if properties.any() {
            Ok(properties)
        } else {
            Err(Error::TokenConstruction {
                kind,
                value: value.to_string(),
                reason: format!("no {kind} rule matches"),
            })
        }
    }

    /// Returns the kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the token text.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.value.as_str()
    }

    /// Returns the properties derived from the current value.
    #[must_use]
    pub const fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Returns true if the token was validated on construction.
    #[must_use]
    pub const fn is_validated(&self) -> bool {
        self.validated
    }

    /// Returns true if this token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword)
    }

    /// Returns true if this is an identifier.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier)
    }

    /// Replaces the value, re-running validation for validated tokens.
    ///
    /// The new value is checked against the standard table. Tokens produced
    /// by a [`Lexer`](super::Lexer) over a custom table should be updated
    /// with [`Token::set_value_with`] and that same table.
    ///
    /// On error the token keeps its previous value and properties.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenConstruction`] if the new value is rejected.
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<()> {
        self.set_value_with(value, RuleTable::standard())
    }

    /// Replaces the value, re-running validation against `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TokenConstruction`] if the new value is rejected.
    pub fn set_value_with(&mut self, value: impl Into<String>, rules: &RuleTable) -> Result<()> {
        let value = value.into();
        self.properties = if self.validated {
            Self::check(rules, self.kind, &value)?
        } else {
            rules.properties_for(self.kind, &value)
        };
        self.value = value;
        Ok(())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Whitespace => write!(f, "{}({:?})", self.kind.label(), self.value),
            _ => write!(f, "{}({})", self.kind.label(), self.value),
        }
    }
}
