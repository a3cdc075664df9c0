//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;

use huginnmd_core::pipeline::{self, RunConfig};
use huginnmd_shared::{AppConfig, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// huginnmd — Huginn data feeds as version-controlled Markdown reports.
#[derive(Parser)]
#[command(
    name = "huginnmd",
    version,
    about = "Convert Huginn feed exports into merged, deduplicated Markdown reports.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Convert a feed export and merge it into the day's report.
    Convert {
        /// Input file produced by Huginn.
        #[arg(short, long)]
        input: PathBuf,

        /// Directory to write the report (and input backups) to.
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Report date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Skip the input backup copy.
        #[arg(long)]
        no_backup: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = ["huginnmd_core", "huginnmd_feed", "huginnmd_report", "huginnmd_shared"]
        .map(|krate| format!("{krate}={level}"))
        .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert {
            input,
            output_dir,
            date,
            no_backup,
        } => cmd_convert(input, output_dir, date, no_backup),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_convert(
    input: PathBuf,
    output_dir: PathBuf,
    date: Option<NaiveDate>,
    no_backup: bool,
) -> Result<()> {
    if !input.exists() {
        return Err(eyre!("input file '{}' does not exist", input.display()));
    }
    if !output_dir.is_dir() {
        return Err(eyre!(
            "output directory '{}' does not exist",
            output_dir.display()
        ));
    }

    let config = load_config()?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let mut run_config = RunConfig::from_app_config(&config, input, output_dir, date);
    if no_backup {
        run_config.backup = false;
    }

    info!(input = %run_config.input_path.display(), %date, "converting feed");

    let report = pipeline::run(&run_config)?;

    println!();
    println!("  Report written!");
    println!("  Report:     {}", report.output_path.display());
    println!("  Parsed:     {}", report.parsed);
    println!("  Skipped:    {}", report.skipped);
    println!("  Carried:    {}", report.carried_over);
    println!("  Added:      {}", report.merge.added);
    println!("  Duplicates: {}", report.merge.duplicates);
    println!("  Total:      {}", report.total_entries);
    if let Some(backup) = &report.backup_path {
        println!("  Backup:     {}", backup.display());
    }
    println!("  Time:       {:.2}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
