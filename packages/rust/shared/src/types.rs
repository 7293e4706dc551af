//! Core domain types for combining documentation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DocCombinerError;

// ---------------------------------------------------------------------------
// TextEncoding
// ---------------------------------------------------------------------------

/// A text encoding the reader may try when decoding a source file.
///
/// Serializes as its canonical label; deserializes from any label accepted
/// by [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TextEncoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "latin-1")]
    Latin1,
    #[serde(rename = "windows-1252")]
    Windows1252,
    #[serde(rename = "ascii")]
    Ascii,
}

impl TextEncoding {
    /// The fallback order used when nothing else is configured.
    pub const DEFAULT_ORDER: [TextEncoding; 4] = [
        TextEncoding::Utf8,
        TextEncoding::Latin1,
        TextEncoding::Windows1252,
        TextEncoding::Ascii,
    ];

    /// Canonical label, as accepted in config files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Latin1 => "latin-1",
            Self::Windows1252 => "windows-1252",
            Self::Ascii => "ascii",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = DocCombinerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Self::Latin1),
            "windows-1252" | "cp1252" => Ok(Self::Windows1252),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            other => Err(DocCombinerError::config(format!(
                "unknown encoding '{other}': expected utf-8, latin-1, windows-1252, or ascii"
            ))),
        }
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = DocCombinerError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

// ---------------------------------------------------------------------------
// SourceDoc
// ---------------------------------------------------------------------------

/// One input Markdown file, loaded and decoded.
#[derive(Debug, Clone)]
pub struct SourceDoc {
    /// Path the file was read from.
    pub path: PathBuf,
    /// Decoded text content.
    pub content: String,
    /// Title taken from the first `#` heading, or derived from the filename.
    pub title: String,
    /// Encoding that successfully decoded the file.
    pub encoding: TextEncoding,
}

impl SourceDoc {
    /// Bare filename, used in section markers.
    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

/// Bare filename of a path, lossily converted for display.
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// TocEntry
// ---------------------------------------------------------------------------

/// A single line in the generated table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// 1-based position in the document.
    pub index: usize,
    /// Display title.
    pub title: String,
    /// Anchor the entry links to (without the leading `#`).
    pub anchor: String,
}

impl fmt::Display for TocEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. [{}](#{})", self.index, self.title, self.anchor)
    }
}
