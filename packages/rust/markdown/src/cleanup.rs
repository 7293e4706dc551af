//! Body cleanup applied before a document is embedded in the combined file.

use std::sync::LazyLock;

use regex::Regex;

/// A `# Heading` line at the very start of the text, with its line break.
static LEADING_H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A#[ \t]+[^\n]*\S[^\n]*(?:\n|\z)").expect("valid regex"));

/// Prepare a document body for its section.
///
/// The section already carries the title as its own heading, so a heading
/// line that opens the document (after leading whitespace) is dropped.
/// Only that one line is removed; later headings are kept. The result is
/// trimmed at both ends.
pub fn section_body(content: &str) -> String {
    let body = content.trim_start();
    let body = match LEADING_H1_RE.find(body) {
        Some(m) => &body[m.end()..],
        None => body,
    };
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_heading() {
        assert_eq!(section_body("# Title\n\nBody text."), "Body text.");
    }

    #[test]
    fn strips_after_leading_whitespace() {
        assert_eq!(section_body("\n\n  \n# Title\r\nBody"), "Body");
    }

    #[test]
    fn heading_only_document_becomes_empty() {
        assert_eq!(section_body("# Lonely"), "");
    }

    #[test]
    fn only_the_first_heading_is_removed() {
        let md = "# One\n\nText\n\n# Two\n";
        assert_eq!(section_body(md), "Text\n\n# Two");
    }

    #[test]
    fn heading_not_at_top_is_kept() {
        let md = "Preamble.\n\n# Title\n\nBody";
        assert_eq!(section_body(md), md);
    }

    #[test]
    fn subheadings_are_kept() {
        assert_eq!(section_body("## Sub\n\nBody"), "## Sub\n\nBody");
    }
}
