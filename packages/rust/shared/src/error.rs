//! Error types for the documentation combiner.
//!
//! Library crates use [`DocCombinerError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all combiner operations.
#[derive(Debug, thiserror::Error)]
pub enum DocCombinerError {
    /// A directory or file expected on disk is absent.
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// None of the configured encodings could decode the file.
    #[error("failed to decode {} with encodings [{tried}]", path.display())]
    Decode { path: PathBuf, tried: String },

    /// Writing the combined document failed.
    #[error("error writing output file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Any other filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocCombinerError>;

impl DocCombinerError {
    /// Create a not-found error for a path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    ///
    /// `NotFound` I/O errors are mapped onto [`DocCombinerError::NotFound`]
    /// so callers see one condition regardless of where it was detected.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound { path };
        }
        Self::Io { path, source }
    }

    /// Wrap a `std::io::Error` raised while writing output.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DocCombinerError::config("unknown encoding 'klingon'");
        assert_eq!(err.to_string(), "config error: unknown encoding 'klingon'");

        let err = DocCombinerError::not_found("/tmp/Docs");
        assert_eq!(err.to_string(), "not found: /tmp/Docs");
    }

    #[test]
    fn io_not_found_maps_to_not_found() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = DocCombinerError::io("/tmp/missing.md", source);
        assert!(matches!(err, DocCombinerError::NotFound { .. }));

        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = DocCombinerError::io("/tmp/locked.md", source);
        assert!(matches!(err, DocCombinerError::Io { .. }));
    }
}
