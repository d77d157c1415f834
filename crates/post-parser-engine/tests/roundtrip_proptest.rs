use proptest::prelude::*;

use post_parser_engine::parsing::{Node, snapshot};
use post_parser_engine::{AttributeScan, Decoder, ParseOptions, decode, encode, parse, parse_with};

const FRAGMENTS: &[&str] = &[
    "<!-- wp:a -->",
    "<!-- /wp:a -->",
    "<!-- wp:ns/b {\"x\":1} -->",
    "<!-- /wp:ns/b -->",
    "<!-- wp:c /-->",
    "<!-- wp:d {\"s\":\"} -->\"} /-->",
    "<!-- more -->",
    "<!--",
    "-->",
    "text",
    "héllo",
    "{}",
    " ",
    "\n",
];

fn post() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..40).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn decode_inverts_encode(input in post()) {
        let doc = parse(&input).unwrap();
        snapshot::invariants(&input, &doc);

        let wire = encode(&doc).unwrap();
        prop_assert_eq!(decode(&wire, &input).unwrap(), doc);
    }

    #[test]
    fn balanced_scan_keeps_invariants(input in post()) {
        let options = ParseOptions::default().with_attribute_scan(AttributeScan::Balanced);
        let doc = parse_with(&input, &options).unwrap();
        snapshot::invariants(&input, &doc);

        let wire = encode(&doc).unwrap();
        prop_assert_eq!(Decoder::new(&input).decode(&wire).unwrap(), doc);
    }

    #[test]
    fn text_without_markers_is_one_phrase(input in "[a-z {}/:é\n-]{1,60}") {
        let doc = parse(&input).unwrap();
        prop_assert_eq!(doc.len(), 1);
        match &doc.nodes[0] {
            Node::Phrase(phrase) => prop_assert_eq!(phrase.content, input.as_str()),
            Node::Block(_) => prop_assert!(false, "unexpected block"),
        }
    }

    #[test]
    fn truncated_buffers_never_decode(input in post(), cut in 1usize..16) {
        let doc = parse(&input).unwrap();
        let wire = encode(&doc).unwrap();
        let cut = cut.min(wire.len());
        prop_assert!(decode(&wire[..wire.len() - cut], &input).is_err());
    }
}
