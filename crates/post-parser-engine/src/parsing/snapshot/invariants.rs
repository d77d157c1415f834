use crate::parsing::node::{Document, Node};
use crate::parsing::span::Span;

/// Validates parser output invariants.
///
/// Asserts that:
/// - every phrase and attribute span is within `input` and slices back to
///   the stored text
/// - phrases are non-empty and never follow another phrase directly
/// - attribute text is brace-delimited
/// - spans appear in document order
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(input: &str, document: &Document<'_>) {
    let mut last_end = 0;
    check_list(input, &document.nodes, &mut last_end);
}

fn check_list(input: &str, nodes: &[Node<'_>], last_end: &mut usize) {
    let mut previous_was_phrase = false;
    for node in nodes {
        match node {
            Node::Phrase(phrase) => {
                assert!(
                    !previous_was_phrase,
                    "adjacent phrases, second at {:?}",
                    phrase.span
                );
                assert!(!phrase.content.is_empty(), "empty phrase at {:?}", phrase.span);
                check_span(input, phrase.span, phrase.content, last_end);
                previous_was_phrase = true;
            }
            Node::Block(block) => {
                if let Some(attributes) = &block.attributes {
                    assert!(
                        attributes.text.starts_with('{') && attributes.text.ends_with('}'),
                        "attributes of `{}` are not brace-delimited: {:?}",
                        block.name,
                        attributes.text
                    );
                    check_span(input, attributes.span, attributes.text, last_end);
                }
                check_list(input, &block.children, last_end);
                previous_was_phrase = false;
            }
        }
    }
}

fn check_span(input: &str, span: Span, text: &str, last_end: &mut usize) {
    assert_eq!(
        span.slice(input),
        Some(text),
        "span {span:?} does not slice back to its text (input len: {})",
        input.len()
    );
    assert!(
        span.start >= *last_end,
        "span {span:?} starts before the previous node ended at {last_end}"
    );
    *last_end = span.end;
}
