use crate::parsing::node::{Document, Node};

/// Longest phrase preview shown in an outline, in characters.
const PREVIEW_CHARS: usize = 60;

/// Renders `document` as one line per node, children indented by two spaces.
///
/// ```text
/// Block core/foo {"a":1}
///   Phrase " abc "
/// Phrase "tail"
/// ```
pub fn outline(document: &Document<'_>) -> String {
    let mut out = String::new();
    for node in document {
        write_node(&mut out, node, 0);
    }
    out
}

fn write_node(out: &mut String, node: &Node<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Block(block) => {
            out.push_str(&format!("{indent}Block {}", block.name));
            if let Some(attributes) = &block.attributes {
                out.push(' ');
                out.push_str(attributes.text);
            }
            out.push('\n');
            for child in &block.children {
                write_node(out, child, depth + 1);
            }
        }
        Node::Phrase(phrase) => {
            out.push_str(&format!(
                "{indent}Phrase {:?}\n",
                preview(phrase.content, PREVIEW_CHARS)
            ));
        }
    }
}

/// Truncates `text` to `max` characters with a "..." suffix if needed.
pub fn preview(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
