//! Multi-word keyword merging.

use tracing::debug;

use super::Element;
use crate::config::ParserConfig;
use crate::lexer::{Token, TokenKind};

/// Collapses adjacent tokens that spell a configured multi-word keyword.
///
/// `GROUP` followed by `BY` becomes a single unchecked `GROUP BY` keyword.
/// Pairs involving a subquery are skipped, and a freshly merged keyword is
/// not merged again with the element after it. Nested queries are left
/// alone: they merged their own tokens when they were built.
#[must_use]
pub fn merge_keywords(elements: Vec<Element>, config: &ParserConfig) -> Vec<Element> {
    let mut output: Vec<Element> = Vec::with_capacity(elements.len());
    let mut just_merged = false;

    for element in elements {
        if !just_merged {
            if let Some(phrase) = merged_phrase(output.last(), &element, config) {
                debug!(phrase = %phrase, "merged keyword");
                if let Some(last) = output.last_mut() {
                    *last = Element::Token(Token::unchecked(TokenKind::Keyword, phrase));
                }
                just_merged = true;
                continue;
            }
        }
        just_merged = false;
        output.push(element);
    }

    output
}

fn merged_phrase(previous: Option<&Element>, current: &Element, config: &ParserConfig) -> Option<String> {
    let previous = previous?.as_token()?;
    let current = current.as_token()?;
    let phrase = format!("{} {}", previous.value(), current.value());
    config.is_merge_phrase(&phrase).then_some(phrase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::query::Query;

    fn merge(sql: &str, config: &ParserConfig) -> Vec<Element> {
        let elements = tokenize(sql).unwrap().into_iter().map(Element::Token).collect();
        merge_keywords(elements, config)
    }

    fn values(elements: &[Element]) -> Vec<&str> {
        elements
            .iter()
            .filter_map(Element::as_token)
            .map(Token::value)
            .collect()
    }

    #[test]
    fn test_group_by_merged() {
        let out = merge("SELECT id FROM t GROUP BY id", &ParserConfig::default());
        assert_eq!(values(&out), vec!["SELECT", "id", "FROM", "t", "GROUP BY", "id"]);
        let merged = out[4].as_token().unwrap();
        assert!(merged.is_keyword());
        assert!(!merged.is_validated());
    }

    #[test]
    fn test_unconfigured_phrase_not_merged() {
        let out = merge("ORDER BY id", &ParserConfig::default());
        assert_eq!(values(&out), vec!["ORDER", "BY", "id"]);
    }

    #[test]
    fn test_configured_phrase_merged() {
        let config = ParserConfig::default().merge_phrase("ORDER BY");
        let out = merge("ORDER BY id", &config);
        assert_eq!(values(&out), vec!["ORDER BY", "id"]);
    }

    #[test]
    fn test_merged_token_not_remerged() {
        let config = ParserConfig::empty()
            .merge_phrase("A B")
            .merge_phrase("A B C");
        let out = merge("A B C", &config);
        assert_eq!(values(&out), vec!["A B", "C"]);
    }

    #[test]
    fn test_subquery_neighbour_is_skipped() {
        let child = Query::parse("SELECT x").unwrap();
        let elements = vec![
            Element::Token(Token::classify("GROUP").unwrap()),
            Element::Query(child),
            Element::Token(Token::classify("BY").unwrap()),
        ];
        let out = merge_keywords(elements.clone(), &ParserConfig::default());
        assert_eq!(out, elements);
    }
}
