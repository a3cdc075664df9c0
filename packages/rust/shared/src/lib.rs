//! Shared types, error model, and configuration for huginnmd.
//!
//! This crate is the foundation depended on by all other huginnmd crates.
//! It provides:
//! - [`HuginnMdError`] — the unified error type
//! - The [`Entry`] feed-item model and [`ReportCollection`] grouping
//! - Configuration ([`AppConfig`], config loading)

pub mod collection;
pub mod config;
pub mod entry;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use collection::ReportCollection;
pub use config::{
    AppConfig, OutputConfig, ReportConfig, config_dir, config_file_path, init_config, load_config,
    load_config_from,
};
pub use entry::{DATE_FORMAT, Entry, domain_of, escape_markdown, unknown_date};
pub use error::{HuginnMdError, Result};
