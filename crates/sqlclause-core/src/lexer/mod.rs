//! SQL Lexer/Tokenizer
//!
//! This module classifies whitespace-separated fragments of a statement into
//! typed tokens using an ordered table of kind rules.

mod kind;
mod rules;
mod token;
mod tokenizer;

pub use kind::TokenKind;
pub use rules::{classify, KindRule, Properties, RuleTable, AGGREGATES, KEYWORDS, OPERATORS, SEPARATORS};
pub use token::Token;
pub use tokenizer::{tokenize, Lexer};
