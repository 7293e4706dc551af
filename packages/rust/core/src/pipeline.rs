//! End-to-end combine run: discover → load → assemble → write.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDateTime};
use tracing::{info, instrument};

use doccombiner_discovery::find_markdown_files;
use doccombiner_shared::{CombineConfig, Result};

use crate::assembler::{self, AssembleOptions, LoadedFile};

/// Result of a combine run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Directory that was scanned.
    pub docs_dir: PathBuf,
    /// Number of Markdown files discovered.
    pub files_found: usize,
    /// Files that made it into the document as normal sections.
    pub files_processed: usize,
    /// Files rendered as inline error sections.
    pub files_failed: usize,
    /// Where the document was written; `None` when there was nothing to do.
    pub output_path: Option<PathBuf>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting run status.
pub trait ProgressReporter {
    /// Called before the source directory is scanned.
    fn searching(&self, dir: &Path);
    /// Called once discovery has finished.
    fn files_found(&self, count: usize);
    /// Called after each file's section has been assembled.
    fn file_processed(&self, name: &str, current: usize, total: usize);
    /// Called before the output file is written.
    fn writing(&self, path: &Path);
    /// Called when the run completes.
    fn done(&self, summary: &RunSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn searching(&self, _dir: &Path) {}
    fn files_found(&self, _count: usize) {}
    fn file_processed(&self, _name: &str, _current: usize, _total: usize) {}
    fn writing(&self, _path: &Path) {}
    fn done(&self, _summary: &RunSummary) {}
}

/// Run the full combine pipeline, stamped with the current local time.
pub fn combine_docs(config: &CombineConfig, progress: &dyn ProgressReporter) -> Result<RunSummary> {
    combine_docs_at(config, Local::now().naive_local(), progress)
}

/// Run the full combine pipeline as if it were `now`.
///
/// 1. Discover `*.md` files in the docs directory (missing dir is fatal)
/// 2. Stop early, writing nothing, if there are none
/// 3. Load and decode each file once
/// 4. Assemble header, TOC, and sections
/// 5. Write `<output_dir>/<prefix><YYYYMMDD>.md`
#[instrument(skip_all, fields(docs_dir = %config.docs_dir.display()))]
pub fn combine_docs_at(
    config: &CombineConfig,
    now: NaiveDateTime,
    progress: &dyn ProgressReporter,
) -> Result<RunSummary> {
    let start = Instant::now();

    progress.searching(&config.docs_dir);
    let paths = find_markdown_files(&config.docs_dir)?;
    progress.files_found(paths.len());

    if paths.is_empty() {
        let summary = RunSummary {
            docs_dir: config.docs_dir.clone(),
            files_found: 0,
            files_processed: 0,
            files_failed: 0,
            output_path: None,
            elapsed: start.elapsed(),
        };
        progress.done(&summary);
        return Ok(summary);
    }

    info!(count = paths.len(), "combining files");

    let files: Vec<LoadedFile> = paths
        .iter()
        .map(|path| assembler::load_file(path, &config.encodings))
        .collect();

    let opts = AssembleOptions {
        title: config.title.clone(),
        generated_at: now,
        progress_delay: config.progress_delay,
    };
    let combined = assembler::assemble(&files, &opts, progress);

    let output_path = assembler::output_path(&config.output_dir, &config.output_prefix, now.date());
    progress.writing(&output_path);
    assembler::write_output(&output_path, &combined.text)?;

    let summary = RunSummary {
        docs_dir: config.docs_dir.clone(),
        files_found: paths.len(),
        files_processed: combined.sections_ok,
        files_failed: combined.sections_failed,
        output_path: Some(output_path),
        elapsed: start.elapsed(),
    };

    info!(
        processed = summary.files_processed,
        failed = summary.files_failed,
        "combine run complete"
    );
    progress.done(&summary);

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
