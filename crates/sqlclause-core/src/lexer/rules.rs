//! Token-kind rule tables and classification.
//!
//! A rule table maps every [`TokenKind`] to a [`KindRule`]. A kind declared
//! with several entries is a literal list tested by membership; a kind
//! declared with exactly one entry is a regular expression anchored at the
//! start of the candidate (a prefix match, not a full match).

use std::sync::LazyLock;

use regex::Regex;

use super::TokenKind;
use crate::error::{Error, Result};

/// Clause keywords, including the merged multi-word `GROUP BY`.
pub const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "AND", "OR", "NOT", "LIKE", "IN", "GROUP BY",
];

/// Comparison and arithmetic operators.
pub const OPERATORS: &[&str] = &["=", "<", ">", "<=", ">=", "!=", "+", "-", "*", "/", "%"];

/// Punctuation tokens.
pub const SEPARATORS: &[&str] = &["(", ")", ",", ";"];

/// Aggregate function names.
pub const AGGREGATES: &[&str] = &["COUNT", "SUM", "AVG", "MIN", "MAX"];

const IDENTIFIER_PATTERN: &str = "[a-zA-Z_][a-zA-Z0-9_]*";
const NUMBER_PATTERN: &str = "[0-9]+";
const STRING_PATTERN: &str = "'[^']*'";
const WHITESPACE_PATTERN: &str = "[ \t\n\r]+";

static STANDARD: LazyLock<RuleTable> = LazyLock::new(|| {
    RuleTable::from_entries([
        (TokenKind::Keyword, KEYWORDS),
        (TokenKind::Operator, OPERATORS),
        (TokenKind::Separator, SEPARATORS),
        (TokenKind::Identifier, &[IDENTIFIER_PATTERN][..]),
        (TokenKind::Number, &[NUMBER_PATTERN][..]),
        (TokenKind::String, &[STRING_PATTERN][..]),
        (TokenKind::Whitespace, &[WHITESPACE_PATTERN][..]),
        (TokenKind::Aggregate, AGGREGATES),
    ])
});

/// The rule a single kind is tested with.
#[derive(Debug, Clone)]
pub enum KindRule {
    /// Exact membership in a list of literals.
    Literals(Vec<String>),
    /// Prefix match against a compiled pattern.
    Pattern(Regex),
}

impl KindRule {
    /// Builds a rule from raw table entries.
    ///
    /// A single entry that does not compile as a pattern is kept as a
    /// one-element literal list.
    #[must_use]
    pub fn from_entries(entries: &[&str]) -> Self {
        if let [pattern] = entries {
            if let Ok(regex) = Regex::new(&format!("^(?:{pattern})")) {
                return Self::Pattern(regex);
            }
        }
        Self::Literals(entries.iter().map(|s| (*s).to_string()).collect())
    }

    /// Tests a candidate value against the rule.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Literals(literals) => literals.iter().any(|l| l == value),
            Self::Pattern(regex) => regex.is_match(value),
        }
    }
}

/// The boolean kind membership computed for a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(TokenKind, bool)>,
}

impl Properties {
    /// Returns the flag recorded for `kind`, or `None` if the kind was not tested.
    #[must_use]
    pub fn get(&self, kind: TokenKind) -> Option<bool> {
        self.entries
            .iter()
            .find_map(|(k, flag)| (*k == kind).then_some(*flag))
    }

    /// Returns true if `kind` was tested and matched.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.get(kind).unwrap_or(false)
    }

    /// Returns true if any kind matched.
    #[must_use]
    pub fn any(&self) -> bool {
        self.entries.iter().any(|(_, flag)| *flag)
    }

    /// Returns the kinds that matched, in table order.
    pub fn matched(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.entries
            .iter()
            .filter_map(|(kind, flag)| flag.then_some(*kind))
    }

    /// Iterates over every tested kind and its flag.
    pub fn iter(&self) -> impl Iterator<Item = (TokenKind, bool)> + '_ {
        self.entries.iter().copied()
    }

    /// Returns the number of tested kinds.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no kind was tested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Identifier is the fallback kind: it only stands when nothing else matched.
    fn disambiguate(&mut self) {
        if self.is(TokenKind::Identifier) && self.matched().count() > 1 {
            for (kind, flag) in &mut self.entries {
                if *kind == TokenKind::Identifier {
                    *flag = false;
                }
            }
        }
    }
}

/// An ordered table of kind rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<(TokenKind, KindRule)>,
}

impl RuleTable {
    /// Returns the process-wide standard table.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Builds a table from `(kind, entries)` pairs, keeping their order.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (TokenKind, &'a [&'a str])>,
    {
        Self {
            rules: entries
                .into_iter()
                .map(|(kind, values)| (kind, KindRule::from_entries(values)))
                .collect(),
        }
    }

    /// Returns the rule registered for `kind`.
    #[must_use]
    pub fn rule(&self, kind: TokenKind) -> Option<&KindRule> {
        self.rules
            .iter()
            .find_map(|(k, rule)| (*k == kind).then_some(rule))
    }

    /// Returns the first kind, in table order, whose rule admits `value`.
    #[must_use]
    pub fn resolve(&self, value: &str) -> Option<TokenKind> {
        self.rules
            .iter()
            .find_map(|(kind, rule)| rule.matches(value).then_some(*kind))
    }

    /// Tests `value` against every rule without rejecting it.
    #[must_use]
    pub fn properties(&self, value: &str) -> Properties {
        let mut properties = Properties {
            entries: self
                .rules
                .iter()
                .map(|(kind, rule)| (*kind, rule.matches(value)))
                .collect(),
        };
        properties.disambiguate();
        properties
    }

    /// Tests `value` against only the rule for `kind`, without rejecting it.
    #[must_use]
    pub fn properties_for(&self, kind: TokenKind, value: &str) -> Properties {
        Properties {
            entries: vec![(kind, self.rule(kind).is_some_and(|r| r.matches(value)))],
        }
    }

    /// Classifies `value` against the whole table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Classification`] if no rule matches.
    pub fn classify(&self, value: &str) -> Result<Properties> {
        let properties = self.properties(value);
        if properties.any() {
            Ok(properties)
        } else {
            Err(Error::Classification {
                value: value.to_string(),
            })
        }
    }
}

/// Classifies `value` against the standard table.
///
/// # Errors
///
/// Returns [`Error::Classification`] if no rule matches.
pub fn classify(value: &str) -> Result<Properties> {
    RuleTable::standard().classify(value)
}
