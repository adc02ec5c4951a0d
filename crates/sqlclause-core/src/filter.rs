//! Filter pipeline.
//!
//! A [`FilterStack`] is an ordered list of named transforms applied one after
//! another. Every filter name must start with [`FILTER_PREFIX`]; the stack is
//! built from an explicit list rather than discovered at runtime.
//!
//! # Example
//!
//! ```
//! use sqlclause_core::filter::{filter_as_keyword, Filter, FilterStack};
//! use sqlclause_core::Query;
//!
//! let mut stack = FilterStack::new();
//! stack.add(Filter::new("filter_as_keyword", filter_as_keyword)).unwrap();
//!
//! let query = Query::parse("SELECT SUM(height) as total FROM person").unwrap();
//! let filtered = stack.apply(query);
//! assert_eq!(filtered.len(), 4);
//! ```

use core::fmt;

use tracing::trace;

use crate::error::{Error, Result};
use crate::lexer::SEPARATORS;
use crate::query::{Element, Query};

/// Prefix every filter name must carry.
pub const FILTER_PREFIX: &str = "filter";

type FilterFn<T> = dyn Fn(T) -> T + Send + Sync;

/// A named transform.
pub struct Filter<T> {
    name: String,
    transform: Box<FilterFn<T>>,
}

impl<T> Filter<T> {
    /// Creates a filter from a name and a transform.
    pub fn new<F>(name: impl Into<String>, transform: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            transform: Box::new(transform),
        }
    }

    /// Returns the filter name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Runs the transform.
    pub fn apply(&self, value: T) -> T {
        (self.transform)(value)
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter").field("name", &self.name).finish_non_exhaustive()
    }
}

/// An ordered stack of filters.
#[derive(Debug)]
pub struct FilterStack<T> {
    filters: Vec<Filter<T>>,
}

/// The filter stack applied to queries before building clause dictionaries.
pub type QueryFilter = FilterStack<Query>;

impl<T> FilterStack<T> {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Creates a stack from an explicit ordered list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilterName`] for the first filter without the prefix.
    pub fn with_filters(filters: impl IntoIterator<Item = Filter<T>>) -> Result<Self> {
        let mut stack = Self::new();
        for filter in filters {
            stack.add(filter)?;
        }
        Ok(stack)
    }

    /// Appends a filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilterName`] if the name lacks [`FILTER_PREFIX`].
    pub fn add(&mut self, filter: Filter<T>) -> Result<()> {
        if !filter.name.starts_with(FILTER_PREFIX) {
            return Err(Error::FilterName { name: filter.name });
        }
        self.filters.push(filter);
        Ok(())
    }

    /// Removes the first filter registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilterNotFound`] if no filter has that name.
    pub fn remove(&mut self, name: &str) -> Result<Filter<T>> {
        let position = self
            .filters
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| Error::FilterNotFound {
                name: name.to_string(),
            })?;
        Ok(self.filters.remove(position))
    }

    /// Returns true if a filter is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.filters.iter().any(|f| f.name == name)
    }

    /// Iterates over the registered names, in application order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.filters.iter().map(Filter::name)
    }

    /// Returns the number of filters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if the stack has no filters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Applies every filter in registration order.
    pub fn apply(&self, value: T) -> T {
        self.filters.iter().fold(value, |value, filter| {
            trace!(filter = filter.name(), "applying filter");
            filter.apply(value)
        })
    }
}

impl<T> Default for FilterStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterStack<Query> {
    /// The default query filters: alias removal.
    #[must_use]
    pub fn query_defaults() -> Self {
        Self {
            filters: vec![Filter::new("filter_as_keyword", filter_as_keyword)],
        }
    }
}

impl FilterStack<String> {
    /// The text preprocessing filters: upper-casing, then separator removal.
    #[must_use]
    pub fn text_defaults() -> Self {
        Self {
            filters: vec![
                Filter::new("filter_upper_case", |text: String| filter_upper_case(&text)),
                Filter::new("filter_separators", |text: String| filter_separators(&text)),
            ],
        }
    }
}

/// Removes every `AS` identifier together with the alias that follows it.
///
/// Only top-level elements are inspected; nested queries are filtered when
/// their own clause dictionary is built.
#[must_use]
pub fn filter_as_keyword(mut query: Query) -> Query {
    let mut elements = core::mem::take(query.elements_mut()).into_iter();
    let mut kept = Vec::with_capacity(elements.len());

    while let Some(element) = elements.next() {
        if is_alias_marker(&element) {
            elements.next();
            continue;
        }
        kept.push(element);
    }

    *query.elements_mut() = kept;
    query
}

fn is_alias_marker(element: &Element) -> bool {
    element
        .as_token()
        .is_some_and(|t| t.is_identifier() && t.value().eq_ignore_ascii_case("as"))
}

/// Upper-cases every space-separated word.
#[must_use]
pub fn filter_upper_case(text: &str) -> String {
    text.split(' ')
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces every separator character with a space.
#[must_use]
pub fn filter_separators(text: &str) -> String {
    text.chars()
        .map(|c| {
            if SEPARATORS.iter().any(|s| s.len() == 1 && s.starts_with(c)) {
                ' '
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Token;

    fn values(query: &Query) -> Vec<&str> {
        query.flatten().into_iter().map(Token::value).collect()
    }

    #[test]
    fn test_upper_case() {
        let out = filter_upper_case("select * from t where col = 'value'");
        assert_eq!(out, "SELECT * FROM T WHERE COL = 'VALUE'");
    }

    #[test]
    fn test_separators() {
        let out = filter_separators("SELECT height FROM ( SELECT id, height FROM person )");
        assert!(!out.contains(['(', ')', ',']));
    }

    #[test]
    fn test_text_stack_applies_in_order() {
        let stack = FilterStack::text_defaults();
        let out = stack.apply("select count(id) from t;".to_string());
        assert_eq!(out, "SELECT COUNT ID  FROM T ");
        assert_eq!(
            stack.names().collect::<Vec<_>>(),
            vec!["filter_upper_case", "filter_separators"]
        );
    }

    #[test]
    fn test_add_requires_prefix() {
        let mut stack: FilterStack<String> = FilterStack::new();
        let err = stack
            .add(Filter::new("shout", |text: String| filter_upper_case(&text)))
            .unwrap_err();
        assert_eq!(
            err,
            Error::FilterName {
                name: "shout".to_string()
            }
        );
        assert!(stack.is_empty());
    }

    #[test]
    fn test_with_filters_checks_every_name() {
        let result = FilterStack::with_filters([
            Filter::new("filter_upper_case", |text: String| filter_upper_case(&text)),
            Filter::new("identity", |text: String| text),
        ]);
        assert!(result.unwrap_err().is_filter_contract());
    }

    #[test]
    fn test_remove() {
        let mut stack = FilterStack::text_defaults();
        let removed = stack.remove("filter_upper_case").unwrap();
        assert_eq!(removed.name(), "filter_upper_case");
        assert_eq!(stack.names().collect::<Vec<_>>(), vec!["filter_separators"]);

        let err = stack.remove("filter_upper_case").unwrap_err();
        assert!(matches!(err, Error::FilterNotFound { .. }));
    }

    #[test]
    fn test_as_keyword_removes_alias() {
        let query = Query::parse("SELECT SUM(height) as total_height FROM person").unwrap();
        let filtered = filter_as_keyword(query);
        assert_eq!(values(&filtered), vec!["SELECT", "SUM(height)", "FROM", "person"]);
    }

    #[test]
    fn test_as_keyword_is_case_insensitive() {
        let query = Query::parse("SELECT a AS x , b As y FROM t").unwrap();
        let filtered = filter_as_keyword(query);
        assert_eq!(values(&filtered), vec!["SELECT", "a", ",", "b", "FROM", "t"]);
    }

    #[test]
    fn test_as_keyword_at_end() {
        let filtered = filter_as_keyword(Query::parse("SELECT a as").unwrap());
        assert_eq!(values(&filtered), vec!["SELECT", "a"]);

        let filtered = filter_as_keyword(Query::parse("SELECT a as x").unwrap());
        assert_eq!(values(&filtered), vec!["SELECT", "a"]);
    }

    #[test]
    fn test_as_keyword_is_idempotent() {
        let query = Query::parse("SELECT a as as as b , c as d FROM t").unwrap();
        let once = filter_as_keyword(query);
        let twice = filter_as_keyword(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_query_defaults() {
        let stack = QueryFilter::query_defaults();
        assert!(stack.contains("filter_as_keyword"));
        assert_eq!(stack.len(), 1);
    }
}
