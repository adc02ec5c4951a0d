//! Human-readable rendering of clause dictionaries.

use std::fmt::Write;

use sqlclause_core::{ClauseDict, Operand};

const INDENT: &str = "    ";

/// Renders `dict` one clause per line.
///
/// A `FROM` clause holding a subquery prints the nested clauses indented
/// inside `Query( ... )`.
#[must_use]
pub fn render_clause_dict(dict: &ClauseDict) -> String {
    let mut out = String::new();
    render_into(&mut out, dict, 0);
    out
}

fn render_into(out: &mut String, dict: &ClauseDict, depth: usize) {
    let pad = INDENT.repeat(depth);
    for (keyword, operands) in dict.iter() {
        match operands.first().and_then(Operand::as_clauses) {
            Some(nested) if keyword == "FROM" => {
                let _ = writeln!(out, "{pad}{keyword}: Query(");
                render_into(out, nested, depth + 1);
                let _ = writeln!(out, "{pad})");
            }
            _ => {
                let _ = writeln!(out, "{pad}{keyword}: {}", operand_list(operands));
            }
        }
    }
}

fn operand_list(operands: &[Operand]) -> String {
    let items: Vec<String> = operands.iter().map(operand_text).collect();
    format!("[{}]", items.join(", "))
}

fn operand_text(operand: &Operand) -> String {
    match operand {
        Operand::Token(token) => token.value().to_string(),
        Operand::Aggregate { function, argument } => format!("{{{function}: {argument}}}"),
        Operand::Clauses(dict) => {
            let clauses: Vec<String> = dict
                .iter()
                .map(|(keyword, operands)| format!("{keyword}: {}", operand_list(operands)))
                .collect();
            format!("{{{}}}", clauses.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlclause_core::{build_clause_dict, Query};

    fn render(sql: &str) -> String {
        render_clause_dict(&build_clause_dict(&Query::parse(sql).unwrap()))
    }

    #[test]
    fn test_flat_clauses() {
        assert_eq!(
            render("SELECT id , name FROM person"),
            "SELECT: [id, ,, name]\nFROM: [person]\n"
        );
    }

    #[test]
    fn test_aggregate() {
        assert_eq!(
            render("SELECT SUM(height) as total FROM person"),
            "SELECT: [{SUM: height}]\nFROM: [person]\n"
        );
    }

    #[test]
    fn test_nested_from() {
        assert_eq!(
            render("SELECT id FROM ( SELECT id FROM person ) WHERE id = 3"),
            "SELECT: [id]\nFROM: Query(\n    SELECT: [id]\n    FROM: [person]\n)\nWHERE: [id, =, 3]\n"
        );
    }

    #[test]
    fn test_nested_outside_from_is_inline() {
        assert_eq!(
            render("SELECT ( SELECT id FROM person ) FROM t"),
            "SELECT: [{SELECT: [id], FROM: [person]}]\nFROM: [t]\n"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(render_clause_dict(&ClauseDict::new()), "");
    }
}
