//! Combined document assembler and writer.
//!
//! Takes the loaded source files and produces one Markdown document:
//! a header with the generation timestamp and table of contents, then one
//! marked section per file. The finished text is written to a dated file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, instrument, warn};

use doccombiner_discovery::read_text;
use doccombiner_markdown::{extract_title, section_body};
use doccombiner_shared::{
    DocCombinerError, Result, SourceDoc, TextEncoding, TocEntry, file_name_of,
};

use crate::pipeline::ProgressReporter;
use crate::toc;

/// Horizontal rule closing the header and each section.
const RULE: &str = "---\n\n";

/// Timestamp format of the `Generated on:` line.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format embedded in the output filename.
const FILENAME_DATE_FORMAT: &str = "%Y%m%d";

/// A discovered file together with the outcome of loading it.
#[derive(Debug)]
pub struct LoadedFile {
    /// Path the file was discovered at.
    pub path: PathBuf,
    /// The decoded document, or why it could not be read.
    pub doc: Result<SourceDoc>,
}

impl LoadedFile {
    /// Bare filename, used in markers and error entries.
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

/// Read, decode, and title a single file.
pub fn load_file(path: &Path, encodings: &[TextEncoding]) -> LoadedFile {
    let doc = read_text(path, encodings).map(|(content, encoding)| {
        let title = extract_title(path, &content);
        debug!(path = %path.display(), %title, %encoding, "loaded source file");
        SourceDoc {
            path: path.to_path_buf(),
            content,
            title,
            encoding,
        }
    });

    LoadedFile {
        path: path.to_path_buf(),
        doc,
    }
}

/// Settings for one assembly.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Top-level heading of the document.
    pub title: String,
    /// Timestamp shown in the header.
    pub generated_at: NaiveDateTime,
    /// Pause after each section so progress output is visible.
    pub progress_delay: Duration,
}

/// Output from assembling a combined document.
#[derive(Debug, Clone)]
pub struct CombinedDocument {
    /// The full Markdown text.
    pub text: String,
    /// Table of contents, one entry per input file.
    pub toc: Vec<TocEntry>,
    /// Files rendered as normal sections.
    pub sections_ok: usize,
    /// Files rendered as inline error sections.
    pub sections_failed: usize,
}

/// Assemble the combined document.
///
/// Section order equals the order of `files`. A file that failed to load
/// becomes an inline error section; it never aborts the assembly.
#[instrument(skip_all, fields(files = files.len()))]
pub fn assemble(
    files: &[LoadedFile],
    opts: &AssembleOptions,
    progress: &dyn ProgressReporter,
) -> CombinedDocument {
    let toc = toc::build_toc(files, &opts.title);

    let mut text = render_header(&opts.title, &opts.generated_at, &toc);
    let mut sections_ok = 0;
    let mut sections_failed = 0;
    let total = files.len();

    for (i, file) in files.iter().enumerate() {
        match &file.doc {
            Ok(doc) => {
                text.push_str(&render_section(doc));
                sections_ok += 1;
            }
            Err(e) => {
                warn!(path = %file.path.display(), error = %e, "error processing file");
                text.push_str(&render_error_section(&file.file_name(), e));
                sections_failed += 1;
            }
        }

        progress.file_processed(&file.file_name(), i + 1, total);

        if !opts.progress_delay.is_zero() {
            std::thread::sleep(opts.progress_delay);
        }
    }

    debug!(sections_ok, sections_failed, len = text.len(), "assembly complete");

    CombinedDocument {
        text,
        toc,
        sections_ok,
        sections_failed,
    }
}

/// Render the title, timestamp, and table of contents.
pub fn render_header(title: &str, generated_at: &NaiveDateTime, toc: &[TocEntry]) -> String {
    format!(
        "# {title}\n\n*Generated on: {}*\n\n## {}\n\n{}\n\n{RULE}",
        generated_at.format(TIMESTAMP_FORMAT),
        toc::TOC_HEADING,
        toc::render_toc(toc),
    )
}

/// Render one file's section between its begin and end markers.
pub fn render_section(doc: &SourceDoc) -> String {
    let file_name = doc.file_name();
    format!(
        "<!-- BEGIN: {file_name} -->\n\n\
         # {title}\n\n\
         *Source: `{file_name}`*\n\n\
         {body}\n\n\
         <!-- END: {file_name} -->\n\n\
         {RULE}",
        title = doc.title,
        body = section_body(&doc.content),
    )
}

/// Render the placeholder section for a file that could not be processed.
pub fn render_error_section(file_name: &str, error: &DocCombinerError) -> String {
    format!(
        "<!-- BEGIN: ERROR - {file_name} -->\n\n\
         # Error: Could not process {file_name}\n\n\
         Error details: {error}\n\n\
         <!-- END: ERROR - {file_name} -->\n\n\
         {RULE}"
    )
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Destination for the combined file: `<dir>/<prefix><YYYYMMDD>.md`.
pub fn output_path(output_dir: &Path, prefix: &str, date: NaiveDate) -> PathBuf {
    output_dir.join(format!("{prefix}{}.md", date.format(FILENAME_DATE_FORMAT)))
}

/// Write the combined document, replacing any existing file.
///
/// Creates the destination directory if needed, then writes to a temporary
/// file beside the target and renames it into place.
#[instrument(skip_all, fields(path = %path.display(), len = content.len()))]
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| DocCombinerError::write(&dir, e))?;

    let temp = dir.join(format!(".{}.tmp", file_name_of(path)));
    if let Err(e) = std::fs::write(&temp, content) {
        let _ = std::fs::remove_file(&temp);
        return Err(DocCombinerError::write(&temp, e));
    }

    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(DocCombinerError::write(path, e));
    }

    info!("wrote combined document");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SilentProgress;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "doccombiner-assembler-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn opts() -> AssembleOptions {
        AssembleOptions {
            title: "Test Docs".into(),
            generated_at: NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(14, 5, 7)
                .unwrap(),
            progress_delay: Duration::ZERO,
        }
    }

    fn doc(name: &str, content: &str) -> LoadedFile {
        let path = PathBuf::from("/docs").join(name);
        LoadedFile {
            path: path.clone(),
            doc: Ok(SourceDoc {
                title: extract_title(&path, content),
                path,
                content: content.into(),
                encoding: TextEncoding::Utf8,
            }),
        }
    }

    #[test]
    fn header_contains_timestamp_and_toc() {
        let files = vec![doc("intro.md", "# Intro\n\nHi.")];
        let combined = assemble(&files, &opts(), &SilentProgress);

        assert!(combined.text.starts_with(
            "# Test Docs\n\n*Generated on: 2024-03-09 14:05:07*\n\n## Table of Contents\n\n\
             1. [Intro](#intro)\n\n---\n\n"
        ));
    }

    #[test]
    fn single_file_section_layout() {
        let files = vec![doc("title.md", "# Title\n\nBody text.")];
        let combined = assemble(&files, &opts(), &SilentProgress);

        let expected_section = "<!-- BEGIN: title.md -->\n\n\
                                # Title\n\n\
                                *Source: `title.md`*\n\n\
                                Body text.\n\n\
                                <!-- END: title.md -->\n\n\
                                ---\n\n";
        assert!(combined.text.ends_with(expected_section));
        assert_eq!(combined.text.matches("<!-- BEGIN: title.md -->").count(), 1);
        assert_eq!(combined.text.matches("<!-- END: title.md -->").count(), 1);
        assert_eq!(combined.text.matches("\n# Title\n").count(), 1);
        assert_eq!(combined.sections_ok, 1);
        assert_eq!(combined.sections_failed, 0);
    }

    #[test]
    fn sections_follow_input_order() {
        let files = vec![
            doc("a.md", "# Zed\n\nfirst"),
            doc("b.md", "# Alpha\n\nsecond"),
        ];
        let combined = assemble(&files, &opts(), &SilentProgress);

        let first = combined.text.find("<!-- BEGIN: a.md -->").unwrap();
        let second = combined.text.find("<!-- BEGIN: b.md -->").unwrap();
        assert!(first < second);
    }

    #[test]
    fn failed_file_becomes_error_section() {
        let path = PathBuf::from("/docs/broken.md");
        let files = vec![
            doc("a.md", "# A\n\nok"),
            LoadedFile {
                doc: Err(DocCombinerError::Decode {
                    path: path.clone(),
                    tried: "utf-8".into(),
                }),
                path,
            },
            doc("c.md", "# C\n\nok"),
        ];
        let combined = assemble(&files, &opts(), &SilentProgress);

        assert!(combined.text.contains("<!-- BEGIN: ERROR - broken.md -->"));
        assert!(combined.text.contains("# Error: Could not process broken.md"));
        assert!(combined.text.contains("Error details: failed to decode"));
        assert!(combined.text.contains("<!-- END: ERROR - broken.md -->"));
        assert!(combined.text.contains("2. [Error: broken.md](#error-2)"));
        assert!(combined.text.contains("<!-- END: c.md -->"));
        assert_eq!(combined.sections_ok, 2);
        assert_eq!(combined.sections_failed, 1);
    }

    #[test]
    fn untitled_file_uses_file_name_heading() {
        let files = vec![doc("release_notes.md", "Just text.")];
        let combined = assemble(&files, &opts(), &SilentProgress);

        assert!(combined.text.contains("# Release Notes\n\n*Source: `release_notes.md`*\n\nJust text.\n\n"));
    }

    #[test]
    fn load_file_reports_missing_file() {
        let tmp = temp_dir();
        let loaded = load_file(&tmp.join("gone.md"), &TextEncoding::DEFAULT_ORDER);
        assert!(matches!(loaded.doc, Err(DocCombinerError::NotFound { .. })));
        assert_eq!(loaded.file_name(), "gone.md");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn output_path_is_dated() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(
            output_path(Path::new("/repo"), "logbie_docs_", date),
            PathBuf::from("/repo/logbie_docs_20250131.md")
        );
    }

    #[test]
    fn write_output_creates_directory_and_overwrites() {
        let tmp = temp_dir();
        let path = tmp.join("nested").join("out.md");

        write_output(&path, "first").unwrap();
        write_output(&path, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");

        // No temp files should remain
        for entry in std::fs::read_dir(tmp.join("nested")).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn failed_temp_write_keeps_existing_output() {
        let tmp = temp_dir();
        let path = tmp.join("out.md");
        std::fs::write(&path, "previous").unwrap();
        // A directory in the temp file's place makes the write fail.
        std::fs::create_dir_all(tmp.join(".out.md.tmp")).unwrap();

        let err = write_output(&path, "replacement").unwrap_err();
        assert!(matches!(err, DocCombinerError::Write { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn write_output_fails_when_directory_is_a_file() {
        let tmp = temp_dir();
        let blocker = tmp.join("blocker");
        std::fs::write(&blocker, "not a dir").unwrap();

        let err = write_output(&blocker.join("out.md"), "text").unwrap_err();
        assert!(matches!(err, DocCombinerError::Write { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
