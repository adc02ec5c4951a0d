//! Parser configuration.

/// Statement keywords that turn a following `(` into a subquery.
pub const SUBQUERY_OPENERS: &[&str] = &[
    "SELECT", "DELETE", "UPDATE", "INSERT", "CREATE", "DROP", "ALTER", "TRUNCATE",
];

/// Multi-word keywords merged by default.
pub const MERGE_PHRASES: &[&str] = &["GROUP BY"];

/// Settings that shape how a [`Query`](crate::Query) is built.
///
/// The same configuration is applied to every nested subquery.
///
/// # Example
///
/// ```
/// use sqlclause_core::{ParserConfig, Query};
///
/// let config = ParserConfig::default().merge_phrase("ORDER BY");
/// let query = Query::parse_with("SELECT id FROM person ORDER BY id", &config).unwrap();
/// assert_eq!(query[4].as_token().unwrap().value(), "ORDER BY");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    merge_phrases: Vec<String>,
    subquery_openers: Vec<String>,
}

impl ParserConfig {
    /// Creates a configuration that merges nothing and opens no subqueries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            merge_phrases: Vec::new(),
            subquery_openers: Vec::new(),
        }
    }

    /// Adds a multi-word keyword to merge.
    #[must_use]
    pub fn merge_phrase(mut self, phrase: impl Into<String>) -> Self {
        let phrase = phrase.into();
        if !self.merge_phrases.contains(&phrase) {
            self.merge_phrases.push(phrase);
        }
        self
    }

    /// Adds a statement keyword that opens a subquery after `(`.
    #[must_use]
    pub fn subquery_opener(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        if !self.subquery_openers.contains(&keyword) {
            self.subquery_openers.push(keyword);
        }
        self
    }

    /// Returns the multi-word keywords to merge.
    #[must_use]
    pub const fn merge_phrases(&self) -> &[String] {
        self.merge_phrases.as_slice()
    }

    /// Returns the keywords that open a subquery.
    #[must_use]
    pub const fn subquery_openers(&self) -> &[String] {
        self.subquery_openers.as_slice()
    }

    /// Returns true if `phrase` is a multi-word keyword to merge.
    #[must_use]
    pub fn is_merge_phrase(&self, phrase: &str) -> bool {
        self.merge_phrases.iter().any(|p| p == phrase)
    }

    /// Returns true if `value` opens a subquery when it follows `(`.
    #[must_use]
    pub fn opens_subquery(&self, value: &str) -> bool {
        self.subquery_openers.iter().any(|k| k == value)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        let config = MERGE_PHRASES
            .iter()
            .fold(Self::empty(), |config, phrase| config.merge_phrase(*phrase));
        SUBQUERY_OPENERS
            .iter()
            .fold(config, |config, keyword| config.subquery_opener(*keyword))
    }
}
