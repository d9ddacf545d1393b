// src/crawl/rewrite.rs
// =============================================================================
// Substitutes href attributes in a page, one occurrence at a time.
//
// Links are processed in document order, and each processed link consumes
// exactly one textual occurrence of `href="<value>"`: the first one that has
// not been substituted yet. So a page with the same href three times gets
// three independent substitutions, and the output of an earlier substitution
// is never matched by a later one.
//
// Edits are recorded against the original text and applied in one pass at
// the end.
// =============================================================================

use std::ops::Range;

#[derive(Debug)]
pub struct HrefRewriter {
    source: String,
    // Sorted by start, never overlapping
    edits: Vec<Edit>,
}

#[derive(Debug)]
struct Edit {
    range: Range<usize>,
    replacement: String,
}

impl HrefRewriter {
    pub fn new(source: String) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    // Replaces the first unsubstituted `href="<href>"` with
    // `href="<replacement>"`
    //
    // Returns false (and changes nothing) if no such occurrence is left,
    // e.g. when the page quotes the attribute with single quotes.
    pub fn replace_next(&mut self, href: &str, replacement: &str) -> bool {
        let needle = format!("href=\"{}\"", href);
        let mut from = 0;

        while let Some(offset) = self.source[from..].find(&needle) {
            let start = from + offset;
            let end = start + needle.len();

            let overlap = self
                .edits
                .iter()
                .find(|edit| edit.range.start < end && start < edit.range.end)
                .map(|edit| edit.range.end);

            match overlap {
                // Overlaps an earlier substitution, keep looking after it
                Some(edit_end) => from = edit_end,
                None => {
                    let at = self.edits.partition_point(|edit| edit.range.start < start);
                    self.edits.insert(
                        at,
                        Edit {
                            range: start..end,
                            replacement: format!("href=\"{}\"", replacement),
                        },
                    );
                    return true;
                }
            }
        }

        false
    }

    pub fn finish(self) -> String {
        let mut output = String::with_capacity(self.source.len());
        let mut cursor = 0;

        for edit in &self.edits {
            output.push_str(&self.source[cursor..edit.range.start]);
            output.push_str(&edit.replacement);
            cursor = edit.range.end;
        }
        output.push_str(&self.source[cursor..]);

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_replacement() {
        let mut rewriter = HrefRewriter::new(r#"<a href="foo">x</a>"#.to_string());
        assert!(rewriter.replace_next("foo", "foo/index.html"));
        assert_eq!(rewriter.finish(), r#"<a href="foo/index.html">x</a>"#);
    }

    #[test]
    fn test_duplicates_consumed_in_order() {
        let page = r#"<a href="foo">1</a><a href="foo">2</a><a href="foo">3</a>"#;
        let mut rewriter = HrefRewriter::new(page.to_string());

        assert!(rewriter.replace_next("foo", "A"));
        assert!(rewriter.replace_next("foo", "B"));

        assert_eq!(
            rewriter.finish(),
            r#"<a href="A">1</a><a href="B">2</a><a href="foo">3</a>"#
        );
    }

    #[test]
    fn test_replacement_text_is_not_matched_again() {
        // The first link's replacement reads exactly like the second link
        let page = r#"<a href="foo">1</a> <a href="foo/index.html">2</a>"#;
        let mut rewriter = HrefRewriter::new(page.to_string());

        assert!(rewriter.replace_next("foo", "foo/index.html"));
        assert!(rewriter.replace_next("foo/index.html", "../elsewhere.html"));

        assert_eq!(
            rewriter.finish(),
            r#"<a href="foo/index.html">1</a> <a href="../elsewhere.html">2</a>"#
        );
    }

    #[test]
    fn test_missing_literal_is_left_alone() {
        let page = "<a href='foo'>single quotes</a>";
        let mut rewriter = HrefRewriter::new(page.to_string());

        assert!(!rewriter.replace_next("foo", "foo/index.html"));
        assert_eq!(rewriter.finish(), page);
    }

    #[test]
    fn test_exhausted_occurrences() {
        let mut rewriter = HrefRewriter::new(r#"<a href="x">x</a>"#.to_string());
        assert!(rewriter.replace_next("x", "y"));
        assert!(!rewriter.replace_next("x", "z"));
        assert_eq!(rewriter.finish(), r#"<a href="y">x</a>"#);
    }

    #[test]
    fn test_non_ascii_text_around_edits() {
        let page = r#"<p>café</p><a href="é">é</a>"#;
        let mut rewriter = HrefRewriter::new(page.to_string());
        assert!(rewriter.replace_next("é", "%C3%A9/index.html"));
        assert_eq!(rewriter.finish(), r#"<p>café</p><a href="%C3%A9/index.html">é</a>"#);
    }
}
