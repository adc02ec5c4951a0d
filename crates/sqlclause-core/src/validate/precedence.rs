//! Token precedence table.

use crate::lexer::TokenKind;

/// Which tokens may follow a token of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecedenceRule {
    /// Kinds allowed as the next token.
    pub valid_next: &'static [TokenKind],
    /// Values never allowed as the next token.
    pub invalid_next: &'static [&'static str],
}

impl PrecedenceRule {
    /// Returns true if a token of `kind` with `value` may follow.
    #[must_use]
    pub fn admits(&self, kind: TokenKind, value: &str) -> bool {
        self.valid_next.contains(&kind) && !self.invalid_next.contains(&value)
    }
}

const KEYWORD: PrecedenceRule = PrecedenceRule {
    valid_next: &[
        TokenKind::Aggregate,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::Keyword,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Separator,
    ],
    invalid_next: &[
        "WHERE", "AND", "OR", "NOT", "LIKE", "IN", "INSERT", "UPDATE", "DELETE",
    ],
};

const AGGREGATE: PrecedenceRule = PrecedenceRule {
    valid_next: &[
        TokenKind::Keyword,
        TokenKind::Aggregate,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::Separator,
    ],
    invalid_next: &["INSERT", "UPDATE", "DELETE"],
};

const IDENTIFIER: PrecedenceRule = PrecedenceRule {
    valid_next: &[
        TokenKind::Keyword,
        TokenKind::Aggregate,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Separator,
    ],
    invalid_next: &[],
};

const OPERATOR: PrecedenceRule = PrecedenceRule {
    valid_next: &[
        TokenKind::Keyword,
        TokenKind::Aggregate,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Separator,
    ],
    invalid_next: &["SELECT", "INSERT", "UPDATE", "DELETE"],
};

const LITERAL: PrecedenceRule = PrecedenceRule {
    valid_next: &[
        TokenKind::Keyword,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::Separator,
    ],
    invalid_next: &[],
};

const SEPARATOR: PrecedenceRule = PrecedenceRule {
    valid_next: &[
        TokenKind::Keyword,
        TokenKind::Aggregate,
        TokenKind::Identifier,
        TokenKind::Operator,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::Separator,
    ],
    invalid_next: &[],
};

const WHITESPACE: PrecedenceRule = PrecedenceRule {
    valid_next: &TokenKind::ALL,
    invalid_next: &[],
};

/// Returns the precedence rule for tokens of `kind`.
///
/// Every kind has a row. Literals and separators are also admitted after
/// keywords, identifiers and operators, beyond the classic table where only
/// keywords, aggregates, identifiers and operators follow those kinds.
#[must_use]
pub const fn rule_for(kind: TokenKind) -> &'static PrecedenceRule {
    match kind {
        TokenKind::Keyword => &KEYWORD,
        TokenKind::Aggregate => &AGGREGATE,
        TokenKind::Identifier => &IDENTIFIER,
        TokenKind::Operator => &OPERATOR,
        TokenKind::Number | TokenKind::String => &LITERAL,
        TokenKind::Separator => &SEPARATOR,
        TokenKind::Whitespace => &WHITESPACE,
    }
}
