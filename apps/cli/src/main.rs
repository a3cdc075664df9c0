//! huginnmd CLI — Huginn data feeds as Markdown reports.
//!
//! Converts a Huginn feed export into a merged, deduplicated,
//! version-control-friendly Markdown report, one document per day.

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
