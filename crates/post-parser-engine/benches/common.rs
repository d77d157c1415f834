// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_post(paragraphs: usize) -> String {
    let base = "<!-- wp:paragraph {\"align\":\"left\"} -->\n<p>Paragraph with some content.</p>\n<!-- /wp:paragraph -->\n\n<!-- wp:image {\"id\":42} /-->\n\n";
    base.repeat(paragraphs)
}

#[allow(dead_code)]
pub fn generate_nested_post(sections: usize, depth: usize) -> String {
    let mut content = String::new();
    for _ in 0..sections {
        content.push_str(&generate_nested_group(depth));
        content.push('\n');
    }
    content
}

#[allow(dead_code)]
fn generate_nested_group(remaining_depth: usize) -> String {
    if remaining_depth == 0 {
        return "<!-- wp:paragraph -->\n<p>Leaf</p>\n<!-- /wp:paragraph -->\n".to_string();
    }
    format!(
        "<!-- wp:group -->\n{}{}<!-- /wp:group -->\n",
        generate_nested_group(remaining_depth - 1),
        generate_nested_group(remaining_depth - 1)
    )
}

/// Opening markers that never close, the worst case for backtracking.
#[allow(dead_code)]
pub fn generate_unclosed_openers(count: usize) -> String {
    "<!-- wp:quote -->text ".repeat(count)
}

/// Attribute objects whose marker never ends, so every scan runs to the end
/// of the input unless earlier scans are reused.
#[allow(dead_code)]
pub fn generate_unterminated_attributes(count: usize) -> String {
    "<!-- wp:a {} x".repeat(count)
}
