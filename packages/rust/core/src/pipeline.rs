//! End-to-end `convert` pipeline: feed blob → parse → merge → render → report file.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, instrument};

use huginnmd_feed::parse_feed;
use huginnmd_report::{RenderOptions, parse_report, render, report_filename};
use huginnmd_shared::{AppConfig, HuginnMdError, ReportCollection, Result};

use crate::merge::{MergeStats, merge};

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Feed blob to convert.
    pub input_path: PathBuf,
    /// Directory the report (and backups) are written to. Must exist.
    pub output_dir: PathBuf,
    /// Report date, used in the filename and front matter.
    pub date: NaiveDate,
    /// Copy the input aside before processing.
    pub backup: bool,
    /// Report filename suffix: `<date>-<suffix>.md`.
    pub filename_suffix: String,
    /// Backup directory name under `output_dir`.
    pub backup_dir: String,
    /// Front matter for the rendered document.
    pub render: RenderOptions,
}

impl RunConfig {
    /// Build a run config for `date` from the app config.
    pub fn from_app_config(
        config: &AppConfig,
        input_path: PathBuf,
        output_dir: PathBuf,
        date: NaiveDate,
    ) -> Self {
        Self {
            input_path,
            output_dir,
            date,
            backup: config.output.backup,
            filename_suffix: config.output.filename_suffix.clone(),
            backup_dir: config.output.backup_dir.clone(),
            render: RenderOptions {
                layout: config.report.layout.clone(),
                title: config.report.title.clone(),
                categories: config.report.categories.clone(),
                date,
            },
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct RunReport {
    /// Where the rendered report was written.
    pub output_path: PathBuf,
    /// Where the input backup landed, when backups are on.
    pub backup_path: Option<PathBuf>,
    /// Entries parsed from the feed.
    pub parsed: usize,
    /// Records skipped during feed parsing.
    pub skipped: usize,
    /// Entries carried over from an existing report for the day.
    pub carried_over: usize,
    /// Merge counters.
    pub merge: MergeStats,
    /// Entries in the rendered document.
    pub total_entries: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Run the full pipeline once.
///
/// Reads and parses the input blob, re-reads any existing report for the
/// same date, merges, renders, and overwrites the report file. The
/// report on disk is the only state carried between runs — and the path
/// read is the path written, so a rerun on the same day folds into the
/// earlier output.
///
/// Single-threaded and synchronous; concurrent invocations against the
/// same output file must be serialized by the caller.
#[instrument(skip_all, fields(input = %config.input_path.display(), date = %config.date))]
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let start = Instant::now();

    let input = std::fs::read_to_string(&config.input_path)
        .map_err(|e| HuginnMdError::io(&config.input_path, e))?;

    let backup_path = if config.backup {
        Some(backup_input(
            &config.input_path,
            &config.output_dir,
            &config.backup_dir,
        )?)
    } else {
        None
    };

    let feed = parse_feed(&input);
    let parsed = feed.entries.len();
    let skipped = feed.skipped.len();
    info!(entries = parsed, skipped, "feed parsed");

    let output_path = config
        .output_dir
        .join(report_filename(config.date, &config.filename_suffix));

    let existing = load_existing_report(&output_path)?;
    let carried_over = existing.entry_count();

    let (combined, merge_stats) = merge(existing, feed.entries);

    let document = render(&combined, &config.render);
    std::fs::write(&output_path, &document).map_err(|e| HuginnMdError::io(&output_path, e))?;

    info!(
        path = %output_path.display(),
        added = merge_stats.added,
        duplicates = merge_stats.duplicates,
        total = combined.entry_count(),
        "report written"
    );

    Ok(RunReport {
        output_path,
        backup_path,
        parsed,
        skipped,
        carried_over,
        merge: merge_stats,
        total_entries: combined.entry_count(),
        elapsed: start.elapsed(),
    })
}

/// Parse the existing report for the day, or start empty.
fn load_existing_report(path: &Path) -> Result<ReportCollection> {
    if !path.exists() {
        debug!(path = %path.display(), "no existing report, starting empty");
        return Ok(ReportCollection::new());
    }
    let content = std::fs::read_to_string(path).map_err(|e| HuginnMdError::io(path, e))?;
    Ok(parse_report(&content))
}

/// Copy the input file verbatim into the backup directory, creating it
/// on demand. Backups are named `input-backup-<YYYY-MM-DD-HHMMSS>-<name>`.
fn backup_input(input: &Path, output_dir: &Path, backup_dir: &str) -> Result<PathBuf> {
    let dir = output_dir.join(backup_dir);
    std::fs::create_dir_all(&dir).map_err(|e| HuginnMdError::io(&dir, e))?;

    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "input".to_string());
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    let path = dir.join(format!("input-backup-{timestamp}-{name}"));

    std::fs::copy(input, &path).map_err(|e| HuginnMdError::io(&path, e))?;
    debug!(path = %path.display(), "input backed up");
    Ok(path)
}
