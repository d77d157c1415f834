//! Behavioural tests for the grammar engine as a whole.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{
    Attributes, Block, BlockName, Document, Node, ParseError, ParseOptions, Phrase, parse,
    parse_with, snapshot, span::Span,
};

fn block<'a>(raw: &'a str, attributes: Option<Attributes<'a>>, children: Vec<Node<'a>>) -> Node<'a> {
    Node::Block(Block {
        name: BlockName::parse(raw).unwrap(),
        attributes,
        children,
    })
}

fn phrase(input: &str, start: usize, end: usize) -> Node<'_> {
    Node::Phrase(Phrase {
        span: Span::new(start, end),
        content: &input[start..end],
    })
}

fn parse_checked(input: &str) -> Document<'_> {
    let doc = parse(input).unwrap();
    snapshot::invariants(input, &doc);
    doc
}

#[rstest]
#[case("foobar")]
#[case("<p><!-- more --></p>")]
#[case("wp:foo -->")]
#[case("<!-- wp:")]
#[case("<!--")]
#[case("héllo wörld <!-- not a block -->")]
fn text_without_blocks_is_one_phrase(#[case] input: &str) {
    let doc = parse_checked(input);
    assert_eq!(doc.nodes, vec![phrase(input, 0, input.len())]);
}

#[test]
fn empty_input_is_empty_document() {
    let doc = parse_checked("");
    assert!(doc.is_empty());
}

#[test]
fn balanced_namespaced_block_with_phrase_child() {
    let input = "<!-- wp:a/b -->X<!-- /wp:a/b -->";
    let doc = parse_checked(input);

    assert_eq!(doc.nodes, vec![block("a/b", None, vec![phrase(input, 15, 16)])]);
    let Node::Block(b) = &doc.nodes[0] else {
        panic!("expected Block");
    };
    assert_eq!(b.name.namespace(), "a");
    assert_eq!(b.name.name(), "b");
}

#[test]
fn void_block_defaults_to_core_namespace() {
    let doc = parse_checked("<!-- wp:foo /-->");

    assert_eq!(doc.nodes, vec![block("foo", None, vec![])]);
    let Node::Block(foo) = &doc.nodes[0] else {
        panic!("expected Block");
    };
    assert_eq!(foo.name.namespace(), "core");
}

#[test]
fn mismatched_closer_does_not_make_a_block() {
    let input = "<!-- wp:a -->X<!-- /wp:b -->";
    let doc = parse_checked(input);

    assert_eq!(doc.nodes, vec![phrase(input, 0, input.len())]);
}

#[test]
fn closer_must_repeat_the_name_text() {
    let input = "<!-- wp:foo -->X<!-- /wp:core/foo -->";
    let doc = parse_checked(input);

    assert!(doc.blocks().next().is_none());
}

#[test]
fn void_block_nested_in_balanced_block() {
    let doc = parse_checked("<!-- wp:foo --><!-- wp:bar /--><!-- /wp:foo -->");

    assert_eq!(doc.nodes, vec![block("foo", None, vec![block("bar", None, vec![])])]);
}

#[test]
fn attributes_keep_their_raw_text() {
    let input = "<!-- wp:foo {\"a\":1} /-->";
    let doc = parse_checked(input);

    let attributes = Attributes {
        span: Span::new(12, 19),
        text: "{\"a\":1}",
    };
    assert_eq!(doc.nodes, vec![block("foo", Some(attributes), vec![])]);
}

#[test]
fn trailing_text_after_last_block() {
    let input = "<!-- wp:foo /-->tail";
    let doc = parse_checked(input);

    assert_eq!(
        doc.nodes,
        vec![block("foo", None, vec![]), phrase(input, 16, 20)]
    );
}

#[test]
fn deep_nesting_with_phrasing_children() {
    let input = "<!-- wp:foo --> abc <!-- wp:bar {\"abc\": true} /--> def <!-- wp:baz --> ghi <!-- wp:qux /--> jkl <!-- /wp:baz --> mno <!-- /wp:foo -->";
    let doc = parse_checked(input);

    assert_eq!(
        snapshot::outline(&doc),
        "Block core/foo
  Phrase \" abc \"
  Block core/bar {\"abc\": true}
  Phrase \" def \"
  Block core/baz
    Phrase \" ghi \"
    Block core/qux
    Phrase \" jkl \"
  Phrase \" mno \"
"
    );
}

#[test]
fn siblings_keep_document_order() {
    let input = "<!-- wp:one /-->a<!-- wp:two --><!-- /wp:two -->b<!-- wp:three /-->";
    let doc = parse_checked(input);

    let order: Vec<_> = doc
        .iter()
        .map(|node| match node {
            Node::Block(b) => b.name.name(),
            Node::Phrase(p) => p.content,
        })
        .collect();
    assert_eq!(order, ["one", "a", "two", "b", "three"]);
}

#[test]
fn depth_limit_surfaces_as_error() {
    let input = "<!-- wp:a --><!-- wp:b --><!-- /wp:b --><!-- /wp:a -->";

    let options = ParseOptions::default().with_max_depth(1);
    assert_eq!(
        parse_with(input, &options),
        Err(ParseError::DepthExceeded {
            max_depth: 1,
            offset: 13
        })
    );

    let options = ParseOptions::default().with_max_depth(2);
    assert!(parse_with(input, &options).is_ok());
}

#[test]
fn unclosed_openers_past_the_depth_limit_stay_phrase_text() {
    let input = "<!-- wp:p -->x".repeat(300);
    let doc = parse_checked(&input);

    assert_eq!(doc.nodes, vec![phrase(&input, 0, input.len())]);
}

#[test]
fn void_block_after_many_unclosed_openers() {
    let openers = "<!-- wp:p -->".repeat(257);
    let input = format!("{openers}<!-- wp:foo /-->");
    let doc = parse_checked(&input);

    assert_eq!(
        doc.nodes,
        vec![phrase(&input, 0, openers.len()), block("foo", None, vec![])]
    );
}

#[test]
fn closed_nesting_past_the_default_limit_is_an_error() {
    let input = format!("{}{}", "<!-- wp:p -->".repeat(257), "<!-- /wp:p -->".repeat(257));

    assert_eq!(
        parse(&input),
        Err(ParseError::DepthExceeded {
            max_depth: 256,
            offset: 256 * "<!-- wp:p -->".len()
        })
    );
}

#[test]
fn document_serializes_to_json() {
    let doc = parse("<!-- wp:ns/foo {\"a\":1} -->hi<!-- /wp:ns/foo -->").unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(
        json,
        serde_json::json!([{
            "type": "block",
            "namespace": "ns",
            "name": "foo",
            "attributes": "{\"a\":1}",
            "children": [{ "type": "phrase", "content": "hi" }]
        }])
    );
}
