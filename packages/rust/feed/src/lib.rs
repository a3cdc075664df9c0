//! Tagged-text feed parser.
//!
//! Huginn exports feed items as records bracketed by paired tags, each
//! tag appearing twice to delimit its value, in a fixed order:
//!
//! ```text
//! - %DATE_PUBLISHED%2024-01-01 10:00:00 +0000%DATE_PUBLISHED% %AGENT_NAME%ScraperBot%AGENT_NAME% %TITLE%Hello World%TITLE% %URL%https://news.example/story1%URL%
//! ```
//!
//! Records need no separator between them. [`parse_feed`] scans a blob
//! for every record, skipping (and reporting) the ones that fail
//! validation.

mod parser;

pub use parser::{ParsedFeed, SkippedRecord, parse_feed};
