//! End-to-end scenarios: raw statement to clause dictionary, and validation.

mod common;
use common::*;

use sqlclause_core::validate::{base_query_validation, validate, validate_token_order};
use sqlclause_core::{Error, Operand};

#[test]
fn simple_select() {
    let d = dict_of("SELECT id FROM person");
    assert_eq!(d.keys().collect::<Vec<_>>(), vec!["SELECT", "FROM"]);
    assert!(d.get("SELECT").unwrap()[0].is_value("id"));
    assert!(d.get("FROM").unwrap()[0].is_value("person"));
    assert_eq!(
        serde_json::to_string(&d).unwrap(),
        r#"{"SELECT":["id"],"FROM":["person"]}"#
    );
}

#[test]
fn aggregate_with_alias() {
    let d = dict_of("SELECT SUM(height) as total_height FROM person");
    let select = d.get("SELECT").unwrap();
    assert_eq!(select.len(), 1);
    assert!(select[0].is_aggregate("SUM", "height"));
    assert!(d.get("FROM").unwrap()[0].is_value("person"));
    assert_eq!(
        serde_json::to_string(&d).unwrap(),
        r#"{"SELECT":[{"SUM":"height"}],"FROM":["person"]}"#
    );
}

#[test]
fn subquery_in_from() {
    let d = dict_of("SELECT id FROM ( SELECT id FROM person )");
    let from = d.get("FROM").unwrap();
    assert_eq!(from.len(), 1);
    let nested = from[0].as_clauses().unwrap();
    assert!(nested.get("SELECT").unwrap()[0].is_value("id"));
    assert!(nested.get("FROM").unwrap()[0].is_value("person"));
    assert_eq!(
        serde_json::to_string(&d).unwrap(),
        r#"{"SELECT":["id"],"FROM":[{"SELECT":["id"],"FROM":["person"]}]}"#
    );
}

#[test]
fn full_example_with_group_by() {
    let d = dict_of(
        "SELECT SUM(height) as total_height, AVG(height) as average_height \
         FROM ( SELECT id, height FROM person GROUP BY id, height ) WHERE height>100",
    );
    assert_eq!(d.keys().collect::<Vec<_>>(), vec!["SELECT", "FROM", "WHERE"]);

    let select = d.get("SELECT").unwrap();
    assert_eq!(select.len(), 2);
    assert!(select[0].is_aggregate("SUM", "height"));
    assert!(select[1].is_aggregate("AVG", "height"));

    let nested = d.get("FROM").unwrap()[0].as_clauses().unwrap();
    assert_eq!(nested.keys().collect::<Vec<_>>(), vec!["SELECT", "FROM", "GROUP BY"]);
    let group_by = nested.get("GROUP BY").unwrap();
    assert!(group_by[0].is_value("id,"));
    assert!(group_by[1].is_value("height"));

    assert!(d.get("WHERE").unwrap()[0].is_value("height>100"));
}

#[test]
fn nested_alias_is_filtered_in_child() {
    let d = dict_of("SELECT x FROM ( SELECT id as x FROM person )");
    let nested = d.get("FROM").unwrap()[0].as_clauses().unwrap();
    let select = nested.get("SELECT").unwrap();
    assert_eq!(select.len(), 1);
    assert!(matches!(&select[0], Operand::Token(t) if t.value() == "id"));
}

#[test]
fn base_validation_rejects_leading_number() {
    let err = base_query_validation(&parse("123 SELECT x")).unwrap_err();
    assert!(matches!(err, Error::InvalidQuery { index: 0, .. }));
    assert!(err.to_string().starts_with("Invalid Query. Error at index 0"));
}

#[test]
fn order_validation_rejects_select_where() {
    let err = validate_token_order(&parse("SELECT WHERE")).unwrap_err();
    assert!(matches!(err, Error::InvalidQuery { index: 1, .. }));
}

#[test]
fn validators_accept_well_formed_statement() {
    let query = parse("SELECT id FROM ( SELECT id FROM person ) WHERE id = 3");
    assert!(validate(&query).is_ok());
}

#[test]
fn validation_does_not_change_query() {
    let query = parse("SELECT a as b FROM t");
    let before = query.clone();
    let _ = validate(&query);
    assert_eq!(query, before);
}
