//! Markdown report parsing and rendering.
//!
//! The rendered report is the pipeline's only persistent store: on every
//! run the day's document is parsed back into a
//! [`ReportCollection`](huginnmd_shared::ReportCollection), merged with
//! freshly parsed feed entries, and re-rendered. Parser and renderer
//! therefore agree byte-for-byte on the document shape.

mod parser;
mod render;

pub use parser::parse_report;
pub use render::{RenderOptions, render, report_filename};
