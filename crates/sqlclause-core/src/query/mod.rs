//! Query trees.
//!
//! A [`Query`] is an ordered sequence of [`Element`]s, each either a token or
//! a nested subquery. Construction always runs subquery extraction followed
//! by multi-word keyword merging.

mod merge;
mod subquery;

use core::fmt;
use core::ops::Index;

use tracing::debug;

use crate::config::ParserConfig;
use crate::error::Result;
use crate::lexer::{Lexer, Token};

pub use merge::merge_keywords;
pub use subquery::extract_subqueries;

/// One element of a query: a token or a nested statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A classified token.
    Token(Token),
    /// A parenthesized subquery.
    Query(Query),
}

impl Element {
    /// Returns the token if this element is one.
    #[must_use]
    pub const fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            Self::Query(_) => None,
        }
    }

    /// Returns the subquery if this element is one.
    #[must_use]
    pub const fn as_query(&self) -> Option<&Query> {
        match self {
            Self::Query(query) => Some(query),
            Self::Token(_) => None,
        }
    }

    /// Returns true if this element is a token with exactly `value`.
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.as_token().is_some_and(|t| t.value() == value)
    }
}

impl From<Token> for Element {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<Query> for Element {
    fn from(query: Query) -> Self {
        Self::Query(query)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => fmt::Display::fmt(token, f),
            Self::Query(query) => write!(f, "Query({query})"),
        }
    }
}

/// A single SQL statement, top-level or nested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    elements: Vec<Element>,
}

impl Query {
    /// Tokenizes and builds a query with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns a classification error for an unknown fragment, or a
    /// subquery error for an unbalanced parenthesis.
    pub fn parse(sql: &str) -> Result<Self> {
        Self::parse_with(sql, &ParserConfig::default())
    }

    /// Tokenizes and builds a query with a custom configuration.
    ///
    /// # Errors
    ///
    /// See [`Query::parse`].
    pub fn parse_with(sql: &str, config: &ParserConfig) -> Result<Self> {
        debug!(sql, "parsing query");
        let tokens = Lexer::new(sql).tokenize()?;
        Self::from_elements_with(tokens.into_iter().map(Element::Token).collect(), config)
    }

    /// Builds a query from pre-built elements with the default configuration.
    ///
    /// Tokenizing is skipped; subquery extraction and keyword merging still run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubqueryParse`](crate::Error::SubqueryParse) for an
    /// unbalanced parenthesis.
    pub fn from_elements(elements: Vec<Element>) -> Result<Self> {
        Self::from_elements_with(elements, &ParserConfig::default())
    }

    /// Builds a query from pre-built elements with a custom configuration.
    ///
    /// # Errors
    ///
    /// See [`Query::from_elements`].
    pub fn from_elements_with(elements: Vec<Element>, config: &ParserConfig) -> Result<Self> {
        let elements = extract_subqueries(elements, config)?;
        let elements = merge_keywords(elements, config);
        Ok(Self { elements })
    }

    /// Returns the elements of this query.
    #[must_use]
    pub const fn elements(&self) -> &[Element] {
        self.elements.as_slice()
    }

    /// Returns the elements for in-place surgery.
    pub const fn elements_mut(&mut self) -> &mut Vec<Element> {
        &mut self.elements
    }

    /// Consumes the query and returns its elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Returns the element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Returns the number of top-level elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the query has no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the top-level elements.
    pub fn iter(&self) -> core::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Iterates over the direct subqueries.
    pub fn subqueries(&self) -> impl Iterator<Item = &Self> + '_ {
        self.elements.iter().filter_map(Element::as_query)
    }

    /// Returns every token with nested queries expanded in place, depth-first.
    #[must_use]
    pub fn flatten(&self) -> Vec<&Token> {
        let mut tokens = Vec::with_capacity(self.elements.len());
        self.flatten_into(&mut tokens);
        tokens
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a Token>) {
        for element in &self.elements {
            match element {
                Element::Token(token) => out.push(token),
                Element::Query(query) => query.flatten_into(out),
            }
        }
    }
}

impl Index<usize> for Query {
    type Output = Element;

    fn index(&self, index: usize) -> &Self::Output {
        &self.elements[index]
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = &'a Element;
    type IntoIter = core::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(element, f)?;
        }
        Ok(())
    }
}
