#![allow(dead_code)]

use sqlclause_core::{build_clause_dict, ClauseDict, Error, Query, Token};

pub fn parse(sql: &str) -> Query {
    Query::parse(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> Error {
    Query::parse(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn dict_of(sql: &str) -> ClauseDict {
    build_clause_dict(&parse(sql))
}

pub fn flat_values(query: &Query) -> Vec<String> {
    query
        .flatten()
        .into_iter()
        .map(Token::value)
        .map(str::to_string)
        .collect()
}

/// Whitespace-split, non-empty fragments of `sql`.
pub fn fragments(sql: &str) -> Vec<String> {
    sql.split(' ')
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}
