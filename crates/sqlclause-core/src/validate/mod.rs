//! Query validators.
//!
//! Each validator is a stateless pass over the flattened token stream of a
//! query. Validators never modify the query.

mod precedence;

pub use precedence::{rule_for, PrecedenceRule};

use tracing::debug;

use crate::error::{Error, Result};
use crate::lexer::Token;
use crate::query::Query;

/// Keywords a statement may start with.
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "SELECT", "DELETE", "UPDATE", "ALTER", "CREATE", "DROP", "INSERT", "GRANT", "REVOKE",
    "TRUNCATE", "ROLLBACK",
];

/// A named validation pass.
#[derive(Clone, Copy)]
pub struct Validator {
    /// The name reported to users.
    pub name: &'static str,
    check: fn(&Query) -> Result<()>,
}

impl Validator {
    /// Runs the validator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuery`] if the query fails the check.
    pub fn check(&self, query: &Query) -> Result<()> {
        (self.check)(query)
    }
}

impl core::fmt::Debug for Validator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Validator").field("name", &self.name).finish_non_exhaustive()
    }
}

const VALIDATORS: &[Validator] = &[
    Validator {
        name: "base_query_validation",
        check: base_query_validation,
    },
    Validator {
        name: "validate_token_order",
        check: validate_token_order,
    },
];

/// Returns the built-in validators, in the order they run.
#[must_use]
pub const fn validators() -> &'static [Validator] {
    VALIDATORS
}

/// Runs every built-in validator, stopping at the first failure.
///
/// # Errors
///
/// Returns the first [`Error::InvalidQuery`] raised.
pub fn validate(query: &Query) -> Result<()> {
    validators().iter().try_for_each(|v| v.check(query))
}

/// Checks that the statement starts with a statement keyword.
///
/// # Errors
///
/// Returns [`Error::InvalidQuery`] at index 0 if the query is empty or its
/// first token is not in [`STATEMENT_KEYWORDS`].
pub fn base_query_validation(query: &Query) -> Result<()> {
    let first = query.flatten().first().copied().map(Token::value);
    if first.is_some_and(|value| STATEMENT_KEYWORDS.contains(&value)) {
        return Ok(());
    }
    debug!(first = ?first, "query does not start with a statement keyword");
    Err(Error::invalid_query(
        0,
        "Invalid query. Query should begin with a keyword like, SELECT, INSERT, etc.",
    ))
}

/// Checks every adjacent token pair against the precedence table.
///
/// A pair is legal when the next token's kind is allowed after the current
/// kind, its value is not blacklisted, and it does not repeat the current
/// value. The first illegal pair fails the query.
///
/// # Errors
///
/// Returns [`Error::InvalidQuery`] carrying the index of the offending
/// (second) token.
pub fn validate_token_order(query: &Query) -> Result<()> {
    let tokens = query.flatten();
    for (index, pair) in tokens.windows(2).enumerate() {
        let (current, next) = (pair[0], pair[1]);
        let legal = rule_for(current.kind()).admits(next.kind(), next.value())
            && next.value() != current.value();
        if !legal {
            debug!(
                index = index + 1,
                current = current.value(),
                next = next.value(),
                "illegal token order"
            );
            return Err(Error::invalid_query(
                index + 1,
                format!(
                    "Invalid token order, {} cannot precede {}.",
                    current.value(),
                    next.value()
                ),
            ));
        }
    }
    Ok(())
}
