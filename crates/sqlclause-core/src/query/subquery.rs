//! Subquery extraction.

use std::collections::VecDeque;

use tracing::debug;

use super::{Element, Query};
use crate::config::ParserConfig;
use crate::error::{Error, Result};

/// Replaces every `( <opener> ... )` span with a nested [`Query`].
///
/// The input is consumed left to right into a new sequence. When a `(`
/// token is immediately followed by a subquery-opening keyword, the
/// matching `)` is located by depth counting and the tokens strictly
/// between them become a child query, which extracts its own subqueries in
/// turn. Sibling subqueries are all found in the same pass.
///
/// # Errors
///
/// Returns [`Error::SubqueryParse`] if an opening parenthesis has no match.
/// The index is the position the subquery would have taken in the output.
pub fn extract_subqueries(elements: Vec<Element>, config: &ParserConfig) -> Result<Vec<Element>> {
    let mut input: VecDeque<Element> = elements.into();
    let mut output = Vec::with_capacity(input.len());

    while let Some(element) = input.pop_front() {
        let opens = element.has_value("(")
            && input
                .front()
                .and_then(Element::as_token)
                .is_some_and(|next| config.opens_subquery(next.value()));
        if !opens {
            output.push(element);
            continue;
        }

        let Some(close) = matching_close(&input) else {
            let remaining = core::iter::once(&element)
                .chain(input.iter())
                .map(element_text)
                .collect();
            return Err(Error::SubqueryParse {
                index: output.len(),
                remaining,
            });
        };

        let inner: Vec<Element> = input.drain(..close).collect();
        input.pop_front();
        debug!(index = output.len(), len = inner.len(), "extracted subquery");
        output.push(Element::Query(Query::from_elements_with(inner, config)?));
    }

    Ok(output)
}

/// Finds the `)` that closes an already-consumed `(`, relative to the
/// front of `rest`.
fn matching_close(rest: &VecDeque<Element>) -> Option<usize> {
    let mut depth = 1usize;
    for (i, element) in rest.iter().enumerate() {
        if element.has_value("(") {
            depth += 1;
        } else if element.has_value(")") {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

fn element_text(element: &Element) -> String {
    match element {
        Element::Token(token) => token.value().to_string(),
        Element::Query(query) => query.to_string(),
    }
}
