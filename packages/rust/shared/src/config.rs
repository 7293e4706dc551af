//! Application configuration for the documentation combiner.
//!
//! Nothing is required: with no config file and no flags, paths are
//! derived from the location of the running executable. An optional TOML
//! file and CLI flags override those defaults (flags win over the file).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DocCombinerError, Result};
use crate::types::TextEncoding;

/// Source directory name, resolved against the install root.
const DOCS_DIR_NAME: &str = "Docs";

// ---------------------------------------------------------------------------
// Config structs (matching the TOML schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Document generation settings.
    #[serde(default)]
    pub combiner: CombinerSettings,
}

/// `[paths]` section. Unset entries fall back to the install root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory scanned for `*.md` files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_dir: Option<PathBuf>,

    /// Directory the combined file is written into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

/// `[combiner]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinerSettings {
    /// Top-level heading of the combined document.
    #[serde(default = "default_title")]
    pub title: String,

    /// Output filename prefix; the date and `.md` are appended.
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,

    /// Encodings tried in order when reading a file.
    #[serde(default = "default_encodings")]
    pub encodings: Vec<TextEncoding>,

    /// Pause after each file so the progress bar visibly advances.
    #[serde(default)]
    pub progress_delay_ms: u64,
}

impl Default for CombinerSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            output_prefix: default_output_prefix(),
            encodings: default_encodings(),
            progress_delay_ms: 0,
        }
    }
}

fn default_title() -> String {
    "Logbie Framework - Combined Documentation".into()
}
fn default_output_prefix() -> String {
    "logbie_docs_".into()
}
fn default_encodings() -> Vec<TextEncoding> {
    TextEncoding::DEFAULT_ORDER.to_vec()
}

// ---------------------------------------------------------------------------
// Combine config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime configuration for one combine run, with all paths resolved.
#[derive(Debug, Clone)]
pub struct CombineConfig {
    /// Directory scanned for Markdown files.
    pub docs_dir: PathBuf,
    /// Directory the combined file is written into.
    pub output_dir: PathBuf,
    /// Top-level heading of the combined document.
    pub title: String,
    /// Output filename prefix.
    pub output_prefix: String,
    /// Encodings tried in order when reading a file.
    pub encodings: Vec<TextEncoding>,
    /// Pause after each processed file.
    pub progress_delay: Duration,
}

impl CombineConfig {
    /// Resolve an [`AppConfig`] against an install root.
    pub fn resolve(config: &AppConfig, install_root: &Path) -> Result<Self> {
        if config.combiner.encodings.is_empty() {
            return Err(DocCombinerError::config(
                "combiner.encodings must list at least one encoding",
            ));
        }

        Ok(Self {
            docs_dir: config
                .paths
                .docs_dir
                .clone()
                .unwrap_or_else(|| install_root.join(DOCS_DIR_NAME)),
            output_dir: config
                .paths
                .output_dir
                .clone()
                .unwrap_or_else(|| install_root.to_path_buf()),
            title: config.combiner.title.clone(),
            output_prefix: config.combiner.output_prefix.clone(),
            encodings: config.combiner.encodings.clone(),
            progress_delay: Duration::from_millis(config.combiner.progress_delay_ms),
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Directory the tool is installed under: the parent of the directory that
/// holds the running executable (e.g. `<root>/tools/doccombiner` → `<root>`).
pub fn install_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|e| DocCombinerError::io("<current exe>", e))?;
    let exe = exe.canonicalize().unwrap_or(exe);

    let bin_dir = exe
        .parent()
        .ok_or_else(|| DocCombinerError::config("executable path has no parent directory"))?;

    Ok(bin_dir.parent().unwrap_or(bin_dir).to_path_buf())
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DocCombinerError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        DocCombinerError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    tracing::debug!(?path, "loaded config file");
    Ok(config)
}
