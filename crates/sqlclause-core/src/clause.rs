//! Clause dictionaries.
//!
//! A [`ClauseDict`] groups the operands of a statement under the keyword
//! that governs them:
//!
//! ```
//! use sqlclause_core::{build_clause_dict, Query};
//!
//! let query = Query::parse("SELECT id FROM person").unwrap();
//! let dict = build_clause_dict(&query);
//! assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["SELECT", "FROM"]);
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::filter::QueryFilter;
use crate::lexer::{Token, AGGREGATES};
use crate::query::{Element, Query};

/// An operand collected under a clause keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A plain token.
    Token(Token),
    /// A nested statement, reduced to its own dictionary.
    Clauses(ClauseDict),
    /// An aggregate call such as `SUM(height)`.
    Aggregate {
        /// The aggregate function name.
        function: String,
        /// The text between the parentheses.
        argument: String,
    },
}

impl Operand {
    /// Returns the token if this operand is a plain token.
    #[must_use]
    pub const fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Returns the nested dictionary if this operand is a subquery.
    #[must_use]
    pub const fn as_clauses(&self) -> Option<&ClauseDict> {
        match self {
            Self::Clauses(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns true for a plain token with exactly `value`.
    #[must_use]
    pub fn is_value(&self, value: &str) -> bool {
        self.as_token().is_some_and(|t| t.value() == value)
    }

    /// Returns true for an aggregate with the given function and argument.
    #[must_use]
    pub fn is_aggregate(&self, function: &str, argument: &str) -> bool {
        matches!(self, Self::Aggregate { function: f, argument: a } if f == function && a == argument)
    }
}

impl Serialize for Operand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Token(token) => serializer.serialize_str(token.value()),
            Self::Clauses(dict) => dict.serialize(serializer),
            Self::Aggregate { function, argument } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(function, argument)?;
                map.end()
            }
        }
    }
}

/// Clause keywords mapped to their operands, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseDict {
    entries: Vec<(String, Vec<Operand>)>,
}

impl ClauseDict {
    /// Creates an empty dictionary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the operands of `keyword`.
    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&[Operand]> {
        self.entries
            .iter()
            .find_map(|(k, operands)| (k == keyword).then_some(operands.as_slice()))
    }

    /// Returns true if `keyword` has an entry.
    #[must_use]
    pub fn contains_key(&self, keyword: &str) -> bool {
        self.get(keyword).is_some()
    }

    /// Iterates over clause keywords in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over `(keyword, operands)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Operand])> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns the number of clauses.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary has no clauses.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ensure(&mut self, keyword: &str) -> &mut Vec<Operand> {
        let position = self
            .entries
            .iter()
            .position(|(k, _)| k == keyword)
            .unwrap_or_else(|| {
                self.entries.push((keyword.to_string(), Vec::new()));
                self.entries.len() - 1
            });
        &mut self.entries[position].1
    }
}

impl Serialize for ClauseDict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (keyword, operands) in &self.entries {
            map.serialize_entry(keyword, operands)?;
        }
        map.end()
    }
}

/// Builds the clause dictionary of `query` using the default query filters.
#[must_use]
pub fn build_clause_dict(query: &Query) -> ClauseDict {
    build_clause_dict_with(query, &QueryFilter::query_defaults())
}

/// Builds the clause dictionary of `query`, filtering it (and every nested
/// query) with `filters` first.
///
/// Keys are seeded from the unfiltered query, so a keyword consumed by a
/// filter still appears with an empty operand list.
#[must_use]
pub fn build_clause_dict_with(query: &Query, filters: &QueryFilter) -> ClauseDict {
    let mut dict = ClauseDict::new();
    for token in query.iter().filter_map(Element::as_token) {
        if token.is_keyword() {
            dict.ensure(token.value());
        }
    }

    let filtered = filters.apply(query.clone());
    let mut current: Option<&str> = None;
    for element in &filtered {
        if let Some(token) = element.as_token().filter(|t| t.is_keyword()) {
            current = Some(token.value());
            continue;
        }
        let Some(keyword) = current else {
            continue;
        };
        let operand = match element {
            Element::Query(nested) => Operand::Clauses(build_clause_dict_with(nested, filters)),
            Element::Token(token) => unwrap_aggregate(token),
        };
        dict.ensure(keyword).push(operand);
    }

    debug!(clauses = dict.len(), "built clause dictionary");
    dict
}

/// Turns `SUM(height)` style identifiers into [`Operand::Aggregate`].
fn unwrap_aggregate(token: &Token) -> Operand {
    if token.is_identifier() {
        if let Some((function, rest)) = token.value().split_once('(') {
            if AGGREGATES.contains(&function) {
                let rest = rest.strip_suffix(',').unwrap_or(rest);
                let argument = rest.strip_suffix(')').unwrap_or(rest);
                return Operand::Aggregate {
                    function: function.to_string(),
                    argument: argument.to_string(),
                };
            }
        }
    }
    Operand::Token(token.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterStack;

    fn dict(sql: &str) -> ClauseDict {
        build_clause_dict(&Query::parse(sql).unwrap())
    }

    #[test]
    fn test_operands_grouped_by_keyword() {
        let d = dict("SELECT id , name FROM person WHERE age > 3");
        assert_eq!(d.keys().collect::<Vec<_>>(), vec!["SELECT", "FROM", "WHERE"]);
        let select = d.get("SELECT").unwrap();
        assert_eq!(select.len(), 3);
        assert!(select[0].is_value("id"));
        assert!(select[2].is_value("name"));
        assert_eq!(d.get("WHERE").unwrap().len(), 3);
    }

    #[test]
    fn test_accessors_are_const() {
        const fn size(dict: &ClauseDict) -> (usize, bool) {
            (dict.len(), dict.is_empty())
        }
        const EMPTY: ClauseDict = ClauseDict::new();

        assert_eq!(size(&EMPTY), (0, true));
        assert_eq!(size(&dict("SELECT id FROM person")), (2, false));
    }

    #[test]
    fn test_aggregate_unwrapped() {
        let d = dict("SELECT COUNT(id), MAX(age) FROM person");
        let select = d.get("SELECT").unwrap();
        assert!(select[0].is_aggregate("COUNT", "id"));
        assert!(select[1].is_aggregate("MAX", "age"));
    }

    #[test]
    fn test_non_aggregate_call_is_plain() {
        let d = dict("SELECT LOWER(name) FROM person");
        assert!(d.get("SELECT").unwrap()[0].is_value("LOWER(name)"));
    }

    #[test]
    fn test_repeated_keyword_appends() {
        let d = dict("WHERE a = 1 AND b = 2 AND c = 3");
        assert_eq!(d.len(), 2);
        assert_eq!(d.get("AND").unwrap().len(), 6);
    }

    #[test]
    fn test_leading_operands_without_keyword_are_dropped() {
        let d = dict("id FROM person");
        assert_eq!(d.keys().collect::<Vec<_>>(), vec!["FROM"]);
    }

    #[test]
    fn test_keyword_consumed_by_filter_keeps_empty_entry() {
        let d = dict("SELECT a as FROM person");
        assert_eq!(d.get("FROM"), Some(&[][..]));
        assert_eq!(d.get("SELECT").unwrap().len(), 2);
    }

    #[test]
    fn test_without_filters_alias_is_kept() {
        let query = Query::parse("SELECT a as x FROM t").unwrap();
        let d = build_clause_dict_with(&query, &FilterStack::new());
        assert_eq!(d.get("SELECT").unwrap().len(), 3);
    }

    #[test]
    fn test_serialize_nested() {
        let d = dict("SELECT SUM(h) FROM ( SELECT h FROM p )");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(
            json,
            r#"{"SELECT":[{"SUM":"h"}],"FROM":[{"SELECT":["h"],"FROM":["p"]}]}"#
        );
    }
}
