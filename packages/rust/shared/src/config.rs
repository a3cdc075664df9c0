//! Application configuration for huginnmd.
//!
//! User config lives at `~/.huginnmd/huginnmd.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HuginnMdError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "huginnmd.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".huginnmd";

// ---------------------------------------------------------------------------
// Config structs (matching huginnmd.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Front matter of the rendered report.
    #[serde(default)]
    pub report: ReportConfig,

    /// File naming and backup policy.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[report]` section — front-matter fields of the rendered document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// `layout:` front-matter value.
    #[serde(default = "default_layout")]
    pub layout: String,

    /// `title:` front-matter value.
    #[serde(default = "default_title")]
    pub title: String,

    /// `categories:` front-matter value.
    #[serde(default = "default_categories")]
    pub categories: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            layout: default_layout(),
            title: default_title(),
            categories: default_categories(),
        }
    }
}

fn default_layout() -> String {
    "post".into()
}
fn default_title() -> String {
    "Huginn RSS Report".into()
}
fn default_categories() -> String {
    "huginn update".into()
}

/// `[output]` section — report naming and input backups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report filename suffix: the report is written as `<date>-<suffix>.md`.
    #[serde(default = "default_filename_suffix")]
    pub filename_suffix: String,

    /// Directory name under the output dir where input backups land.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,

    /// Whether to copy the input file aside before processing.
    #[serde(default = "default_true")]
    pub backup: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename_suffix: default_filename_suffix(),
            backup_dir: default_backup_dir(),
            backup: true,
        }
    }
}

fn default_filename_suffix() -> String {
    "Huginn-Data-Feed".into()
}
fn default_backup_dir() -> String {
    "input-backups".into()
}
fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.huginnmd/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| HuginnMdError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.huginnmd/huginnmd.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| HuginnMdError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| HuginnMdError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| HuginnMdError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| HuginnMdError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| HuginnMdError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("filename_suffix"));
        assert!(toml_str.contains("Huginn RSS Report"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.report.layout, "post");
        assert_eq!(parsed.output.filename_suffix, "Huginn-Data-Feed");
        assert!(parsed.output.backup);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[report]
title = "Nightly Crawl"

[output]
backup = false
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.report.title, "Nightly Crawl");
        assert_eq!(config.report.layout, "post");
        assert_eq!(config.output.backup_dir, "input-backups");
        assert!(!config.output.backup);
    }
}
