//! Shared types, error model, and configuration for the documentation combiner.
//!
//! This crate is the foundation depended on by all other doccombiner crates.
//! It provides:
//! - [`DocCombinerError`], the unified error type
//! - Domain types ([`SourceDoc`], [`TocEntry`], [`TextEncoding`])
//! - Configuration ([`AppConfig`], [`CombineConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CombineConfig, CombinerSettings, PathsConfig, install_root, load_config_from,
};
pub use error::{DocCombinerError, Result};
pub use types::{SourceDoc, TextEncoding, TocEntry, file_name_of};
