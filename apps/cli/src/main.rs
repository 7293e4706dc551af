//! doccombiner CLI: merge a directory of Markdown files into one document.
//!
//! Writes a dated file with a generated table of contents and marked
//! sections for each source file.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
