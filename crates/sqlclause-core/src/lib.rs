//! # sqlclause-core
//!
//! A teaching-grade SQL front-end that turns a statement into a clause
//! dictionary.
//!
//! This crate provides:
//! - A rule-table token classifier and a whitespace tokenizer
//! - Query trees with parenthesized subqueries extracted into child nodes
//! - A named filter pipeline (alias removal, text preprocessing)
//! - Clause dictionaries keyed by clause keyword
//! - Start-keyword and token-order validators
//!
//! It is not a full SQL grammar: there are no joins, no expression
//! precedence and no schema awareness.
//!
//! ## Clause Dictionaries
//!
//! ```rust
//! use sqlclause_core::{build_clause_dict, Query};
//!
//! let query = Query::parse("SELECT SUM(height) as total_height FROM person").unwrap();
//! let dict = build_clause_dict(&query);
//!
//! // The alias is filtered out and the aggregate call unwrapped.
//! assert!(dict.get("SELECT").unwrap()[0].is_aggregate("SUM", "height"));
//! assert!(dict.get("FROM").unwrap()[0].is_value("person"));
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use sqlclause_core::{validate, Query};
//!
//! let query = Query::parse("SELECT WHERE").unwrap();
//! assert!(validate::validate(&query).is_err());
//! ```

pub mod clause;
pub mod config;
pub mod error;
pub mod filter;
pub mod lexer;
pub mod query;
pub mod validate;

pub use clause::{build_clause_dict, build_clause_dict_with, ClauseDict, Operand};
pub use config::ParserConfig;
pub use error::{Error, Result};
pub use filter::{Filter, FilterStack, QueryFilter};
pub use lexer::{Lexer, Token, TokenKind};
pub use query::{Element, Query};
pub use validate::{base_query_validation, validate_token_order, Validator};
