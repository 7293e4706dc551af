//! Source file discovery and decoding.
//!
//! Lists the Markdown files in a documentation directory in a stable order
//! and reads them as text, falling back through a list of encodings when a
//! file is not valid UTF-8.

mod reader;

use std::path::{Path, PathBuf};

use doccombiner_shared::{DocCombinerError, Result};
use tracing::{debug, instrument, warn};

pub use reader::{decode_text, read_text};

/// Extension (compared case-insensitively) that marks a Markdown file.
const MARKDOWN_EXTENSION: &str = ".md";

/// Find all Markdown files directly inside `dir`.
///
/// Returns regular files whose name ends in `.md` (any case), sorted
/// lexicographically. Subdirectories are not descended into. An empty
/// result is not an error; it is logged as a warning and left to the
/// caller.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn find_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DocCombinerError::not_found(dir));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| DocCombinerError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DocCombinerError::io(dir, e))?;
        let path = entry.path();

        if !is_markdown_name(&entry.file_name().to_string_lossy()) {
            continue;
        }
        if !path.is_file() {
            debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }
        files.push(path);
    }

    files.sort();

    if files.is_empty() {
        warn!(dir = %dir.display(), "no Markdown files found");
    } else {
        debug!(count = files.len(), "discovered Markdown files");
    }

    Ok(files)
}

/// Whether a filename carries the Markdown extension, ignoring case.
fn is_markdown_name(name: &str) -> bool {
    name.to_lowercase().ends_with(MARKDOWN_EXTENSION)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
