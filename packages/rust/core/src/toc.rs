//! Table of contents builder.
//!
//! One numbered entry per input file, in input order, each linking to an
//! anchor derived from the file's title.

use tracing::{debug, instrument, warn};

use doccombiner_markdown::{AnchorSet, slugify};
use doccombiner_shared::TocEntry;

use crate::assembler::LoadedFile;

/// Heading of the table of contents itself.
pub const TOC_HEADING: &str = "Table of Contents";

/// Build the table of contents for a set of loaded files.
///
/// Files that failed to load get an `Error: <filename>` entry pointing at
/// `#error-<n>` instead of a title link; the failure is logged and the
/// remaining entries are still produced.
///
/// Anchors are unique within the document. The slugs of `doc_title`, the
/// TOC heading, and every `error-<n>` placeholder are taken before any file
/// title is assigned one.
#[instrument(skip_all, fields(file_count = files.len()))]
pub fn build_toc(files: &[LoadedFile], doc_title: &str) -> Vec<TocEntry> {
    let mut anchors = AnchorSet::new();
    anchors.reserve(slugify(doc_title));
    anchors.reserve(slugify(TOC_HEADING));
    for (i, file) in files.iter().enumerate() {
        if file.doc.is_err() {
            anchors.reserve(error_anchor(i + 1));
        }
    }

    let entries: Vec<TocEntry> = files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let index = i + 1;
            match &file.doc {
                Ok(doc) => TocEntry {
                    index,
                    title: doc.title.clone(),
                    anchor: anchors.anchor_for(&doc.title),
                },
                Err(e) => {
                    warn!(file = %file.file_name(), error = %e, "TOC entry replaced by error placeholder");
                    TocEntry {
                        index,
                        title: format!("Error: {}", file.file_name()),
                        anchor: error_anchor(index),
                    }
                }
            }
        })
        .collect();

    debug!(entries = entries.len(), "TOC built");
    entries
}

fn error_anchor(index: usize) -> String {
    format!("error-{index}")
}

/// Render TOC entries as Markdown list lines joined by newlines.
pub fn render_toc(entries: &[TocEntry]) -> String {
    entries
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use doccombiner_shared::{DocCombinerError, SourceDoc, TextEncoding};

    use super::*;

    fn ok_file(name: &str, title: &str) -> LoadedFile {
        let path = PathBuf::from("/docs").join(name);
        LoadedFile {
            path: path.clone(),
            doc: Ok(SourceDoc {
                path,
                content: format!("# {title}\n"),
                title: title.into(),
                encoding: TextEncoding::Utf8,
            }),
        }
    }

    fn failed_file(name: &str) -> LoadedFile {
        let path = PathBuf::from("/docs").join(name);
        LoadedFile {
            doc: Err(DocCombinerError::Decode {
                path: path.clone(),
                tried: "utf-8".into(),
            }),
            path,
        }
    }

    #[test]
    fn entries_follow_input_order() {
        let files = vec![ok_file("a.md", "Zebra"), ok_file("b.md", "Alpha")];
        let toc = build_toc(&files, "Test Docs");

        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].index, 1);
        assert_eq!(toc[0].title, "Zebra");
        assert_eq!(toc[1].anchor, "alpha");
    }

    #[test]
    fn failed_file_gets_placeholder() {
        let files = vec![ok_file("a.md", "Intro"), failed_file("broken.md")];
        let toc = build_toc(&files, "Test Docs");

        assert_eq!(toc[1].title, "Error: broken.md");
        assert_eq!(toc[1].anchor, "error-2");
    }

    #[test]
    fn duplicate_titles_get_distinct_anchors() {
        let files = vec![ok_file("a.md", "Setup"), ok_file("b.md", "Setup")];
        let toc = build_toc(&files, "Test Docs");

        assert_eq!(toc[0].anchor, "setup");
        assert_eq!(toc[1].anchor, "setup-1");
    }

    #[test]
    fn title_cannot_take_an_error_anchor() {
        let files = vec![ok_file("a.md", "Error 2"), failed_file("b.md")];
        let toc = build_toc(&files, "Test Docs");

        assert_eq!(toc[0].anchor, "error-2-1");
        assert_eq!(toc[1].anchor, "error-2");
    }

    #[test]
    fn title_cannot_take_header_anchors() {
        let files = vec![
            ok_file("a.md", "Table of Contents"),
            ok_file("b.md", "Test Docs"),
        ];
        let toc = build_toc(&files, "Test Docs");

        assert_eq!(toc[0].anchor, "table-of-contents-1");
        assert_eq!(toc[1].anchor, "test-docs-1");
    }

    #[test]
    fn render_joins_lines() {
        let files = vec![ok_file("a.md", "Getting Started"), ok_file("b.md", "API: Basics")];
        let rendered = render_toc(&build_toc(&files, "Test Docs"));

        assert_eq!(
            rendered,
            "1. [Getting Started](#getting-started)\n2. [API: Basics](#api-basics)"
        );
    }
}
