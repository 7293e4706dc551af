//! Markdown text helpers: title extraction, anchor slugs, and body cleanup.
//!
//! Only level-one heading lines are interpreted; everything else in a
//! document is treated as opaque text.

mod cleanup;

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

pub use cleanup::section_body;

/// First line that starts with a single `#` followed by whitespace.
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.*\S)").expect("valid regex"));

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

/// Extract a document title.
///
/// Uses the first level-one heading anywhere in `content`; if there is none,
/// derives a title from the file name (see [`title_from_file_name`]).
pub fn extract_title(path: &Path, content: &str) -> String {
    match first_heading(content) {
        Some(title) => title,
        None => {
            let title = title_from_file_name(path);
            trace!(path = %path.display(), %title, "no heading, using file name");
            title
        }
    }
}

/// Text of the first `# Heading` line, trimmed.
pub fn first_heading(content: &str) -> Option<String> {
    H1_RE.captures(content).map(|c| c[1].trim().to_string())
}

/// Derive a title from a file name: drop the extension, turn `-` and `_`
/// into spaces, and title-case the result.
///
/// `my-notes_v2.md` becomes `My Notes V2`.
pub fn title_from_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    title_case(&stem.replace(['-', '_'], " "))
}

/// Upper-case every letter that does not follow another letter and
/// lower-case the rest, so `v2x` becomes `V2X` and `API` becomes `Api`.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Anchors
// ---------------------------------------------------------------------------

/// Turn a title into an anchor slug: lowercase, whitespace to `-`, and any
/// other punctuation removed.
pub fn slugify(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// Hands out unique anchors for a document.
///
/// The first use of a slug is returned unchanged; repeats get `-1`, `-2`,
/// and so on, matching how renderers number repeated heading ids.
#[derive(Debug, Default)]
pub struct AnchorSet {
    used: HashSet<String>,
    repeats: HashMap<String, usize>,
}

impl AnchorSet {
    /// An empty set with no anchors taken.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an exact anchor as taken so later titles cannot claim it.
    pub fn reserve(&mut self, anchor: impl Into<String>) {
        self.used.insert(anchor.into());
    }

    /// Slugify `title` and reserve a unique anchor for it.
    pub fn anchor_for(&mut self, title: &str) -> String {
        let base = slugify(title);
        let mut candidate = base.clone();

        while self.used.contains(&candidate) {
            let n = self.repeats.entry(base.clone()).or_insert(0);
            *n += 1;
            candidate = format!("{base}-{n}");
        }

        self.used.insert(candidate.clone());
        candidate
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
