//! Error types for tokenizing, parsing, filtering and validating queries.

use thiserror::Error;

use crate::lexer::TokenKind;

/// Errors raised by the query pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A string matched no registered token kind.
    #[error("Invalid token name: {value}")]
    Classification {
        /// The offending fragment.
        value: String,
    },

    /// A token could not be built, or a mutation assigned an invalid value.
    #[error("Value {value:?} is not a valid {kind} token: {reason}")]
    TokenConstruction {
        /// The kind the token was meant to have.
        kind: TokenKind,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An opening parenthesis had no matching close before the end of input.
    #[error("Couldn't parse query. Unbalanced subquery at index {index}, {remaining:?}")]
    SubqueryParse {
        /// Position of the opening parenthesis.
        index: usize,
        /// Values from the opening parenthesis to the end of the sequence.
        remaining: Vec<String>,
    },

    /// A filter name does not carry the reserved prefix.
    #[error("Filter '{name}' must be named with the '{prefix}' prefix", prefix = crate::filter::FILTER_PREFIX)]
    FilterName {
        /// The rejected filter name.
        name: String,
    },

    /// A filter selected for removal is not registered.
    #[error("Filter '{name}' is not registered")]
    FilterNotFound {
        /// The missing filter name.
        name: String,
    },

    /// The statement failed a validator.
    #[error("Invalid Query. Error at index {index}, {message}")]
    InvalidQuery {
        /// Position of the offending token in the flattened stream.
        index: usize,
        /// What went wrong.
        message: String,
    },
}

impl Error {
    /// Builds an [`Error::InvalidQuery`].
    pub fn invalid_query(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidQuery {
            index,
            message: message.into(),
        }
    }

    /// Returns true for errors that break the filter pipeline contract.
    #[must_use]
    pub const fn is_filter_contract(&self) -> bool {
        matches!(self, Self::FilterName { .. } | Self::FilterNotFound { .. })
    }

    /// Returns the token index carried by the error, if any.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::SubqueryParse { index, .. } | Self::InvalidQuery { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_display() {
        let err = Error::invalid_query(3, "Invalid token order, SELECT cannot precede WHERE.");
        assert_eq!(
            err.to_string(),
            "Invalid Query. Error at index 3, Invalid token order, SELECT cannot precede WHERE."
        );
        assert_eq!(err.index(), Some(3));
    }

    #[test]
    fn test_subquery_parse_display() {
        let err = Error::SubqueryParse {
            index: 0,
            remaining: vec!["(".to_string(), "SELECT".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Couldn't parse query. Unbalanced subquery at index 0, [\"(\", \"SELECT\"]"
        );
    }

    #[test]
    fn test_filter_contract_grouping() {
        let named = Error::FilterName {
            name: "strip".to_string(),
        };
        let missing = Error::FilterNotFound {
            name: "filter_x".to_string(),
        };
        assert!(named.is_filter_contract());
        assert!(missing.is_filter_contract());
        assert!(!Error::invalid_query(0, "x").is_filter_contract());
        assert!(named.to_string().contains("'filter' prefix"));
    }
}
