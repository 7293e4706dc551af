//! CLI definition, config resolution, tracing setup, and console output.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use doccombiner_core::pipeline::{self, ProgressReporter, RunSummary};
use doccombiner_shared::{AppConfig, CombineConfig, install_root, load_config_from};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Combine every Markdown file in the docs directory into one dated document.
///
/// With no options, reads `<root>/Docs/*.md` and writes
/// `<root>/logbie_docs_<YYYYMMDD>.md`, where `<root>` is the parent of the
/// directory containing this executable.
#[derive(Parser)]
#[command(name = "doccombiner", version)]
pub(crate) struct Cli {
    /// Optional TOML config file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to read Markdown files from.
    #[arg(long, value_name = "DIR")]
    pub docs_dir: Option<PathBuf>,

    /// Directory to write the combined file into.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Top-level heading of the combined document.
    #[arg(long)]
    pub title: Option<String>,

    /// Pause after each file, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Print the resolved configuration as TOML and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "doccombiner=warn",
        1 => "doccombiner=info",
        2 => "doccombiner=debug",
        _ => "doccombiner=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Config resolution
// ---------------------------------------------------------------------------

/// Merge defaults, the optional config file, and CLI flags (in that order).
fn resolve_app_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => AppConfig::default(),
    };

    if let Some(dir) = &cli.docs_dir {
        config.paths.docs_dir = Some(dir.clone());
    }
    if let Some(dir) = &cli.output_dir {
        config.paths.output_dir = Some(dir.clone());
    }
    if let Some(title) = &cli.title {
        config.combiner.title = title.clone();
    }
    if let Some(ms) = cli.delay_ms {
        config.combiner.progress_delay_ms = ms;
    }

    Ok(config)
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Run the combiner.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let app_config = resolve_app_config(&cli)?;

    if cli.print_config {
        println!("{}", toml::to_string_pretty(&app_config)?);
        return Ok(());
    }

    let root = if app_config.paths.docs_dir.is_some() && app_config.paths.output_dir.is_some() {
        PathBuf::from(".")
    } else {
        install_root()?
    };
    let config = CombineConfig::resolve(&app_config, &root)?;

    info!(
        docs_dir = %config.docs_dir.display(),
        output_dir = %config.output_dir.display(),
        "starting combine run"
    );

    println!("Logbie Documentation Combiner");
    println!("============================");

    let reporter = CliProgress::new();
    let summary = pipeline::combine_docs(&config, &reporter)?;

    match &summary.output_path {
        None => println!("No files to process. Exiting."),
        Some(path) => {
            println!("Successfully created: {}", path.display());
            println!();
            println!("Documentation combination completed successfully!");
            println!("Source directory:      {}", summary.docs_dir.display());
            println!("Total files found:     {}", summary.files_found);
            println!("Total files processed: {}", summary.files_processed);
            if summary.files_failed > 0 {
                println!("Files with errors:     {}", summary.files_failed);
            }
            println!("Output file: {}", path.display());
            println!("Time: {:.1}s", summary.elapsed.as_secs_f64());
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Console progress using an indicatif bar for the per-file loop.
struct CliProgress {
    bar: OnceCell<ProgressBar>,
}

impl CliProgress {
    fn new() -> Self {
        Self {
            bar: OnceCell::new(),
        }
    }

    fn make_bar(total: usize) -> ProgressBar {
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout());
        bar.set_style(
            ProgressStyle::with_template("{prefix} |{bar:50}| {percent}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█-"),
        );
        bar.set_prefix("Processing files:");
        bar.set_message(format!("(0/{total})"));
        bar
    }
}

impl ProgressReporter for CliProgress {
    fn searching(&self, dir: &Path) {
        println!("Searching for Markdown files in: {}", dir.display());
    }

    fn files_found(&self, count: usize) {
        println!("Found {count} Markdown files");
        if count > 0 {
            println!("Combining files...");
            let _ = self.bar.set(Self::make_bar(count));
        }
    }

    fn file_processed(&self, _name: &str, current: usize, total: usize) {
        if let Some(bar) = self.bar.get() {
            bar.set_position(current as u64);
            bar.set_message(format!("({current}/{total})"));
        }
    }

    fn writing(&self, path: &Path) {
        if let Some(bar) = self.bar.get() {
            bar.finish();
        }
        println!("Writing combined content to: {}", path.display());
    }

    fn done(&self, _summary: &RunSummary) {
        if let Some(bar) = self.bar.get() {
            if !bar.is_finished() {
                bar.finish_and_clear();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
