//! Token kinds.

use core::fmt;

/// The closed set of token kinds.
///
/// The declaration order is the order in which the tokenizer tries kinds
/// when resolving a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// Clause keyword (e.g., SELECT, FROM, GROUP BY)
    Keyword,
    /// Comparison or arithmetic operator (e.g., =, <=, *)
    Operator,
    /// Punctuation (e.g., (, ), ,)
    Separator,
    /// Column, table or alias name
    Identifier,
    /// Unsigned integer literal
    Number,
    /// Single-quoted string literal
    String,
    /// Run of blanks
    Whitespace,
    /// Aggregate function name (e.g., COUNT, SUM)
    Aggregate,
}

impl TokenKind {
    /// All kinds, in tokenizer resolution order.
    pub const ALL: [Self; 8] = [
        Self::Keyword,
        Self::Operator,
        Self::Separator,
        Self::Identifier,
        Self::Number,
        Self::String,
        Self::Whitespace,
        Self::Aggregate,
    ];

    /// Returns the lowercase kind name used in rule tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Operator => "operator",
            Self::Separator => "separator",
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::String => "string",
            Self::Whitespace => "whitespace",
            Self::Aggregate => "aggregate",
        }
    }

    /// Returns the display name used when rendering tokens (e.g., `Keyword`).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Keyword => "Keyword",
            Self::Operator => "Operator",
            Self::Separator => "Separator",
            Self::Identifier => "Identifier",
            Self::Number => "Number",
            Self::String => "String",
            Self::Whitespace => "Whitespace",
            Self::Aggregate => "Aggregate",
        }
    }

    /// Parses a kind from its rule-table name (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
