//! Record extraction and per-record validation.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use huginnmd_shared::{Entry, HuginnMdError};

/// Matches one full record: four paired tags in fixed order, with
/// arbitrary tag-free filler between the pairs (the Huginn export puts
/// `- ` before each record and spaces between tags).
static RECORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)%DATE_PUBLISHED%(.*?)%DATE_PUBLISHED%",
        r"[^%]*%AGENT_NAME%(.*?)%AGENT_NAME%",
        r"[^%]*%TITLE%(.*?)%TITLE%",
        r"[^%]*%URL%(.*?)%URL%",
    ))
    .expect("record regex")
});

/// Outcome of parsing one feed blob.
#[derive(Debug, Default)]
pub struct ParsedFeed {
    /// Entries that passed validation, in input order.
    pub entries: Vec<Entry>,
    /// Records dropped during parsing, with the reason.
    pub skipped: Vec<SkippedRecord>,
}

/// One record that failed validation and was dropped.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Zero-based index of the record within the blob.
    pub index: usize,
    /// Why the record was dropped.
    pub reason: HuginnMdError,
}

/// Parse a feed blob into entries.
///
/// A blob with no records is valid and yields an empty [`ParsedFeed`].
/// A record with an unparseable timestamp, an empty field, or a URL the
/// domain cannot be derived from is skipped with a diagnostic; the rest
/// of the blob still parses. Titles come out sanitized (see
/// [`huginnmd_shared::escape_markdown`]).
pub fn parse_feed(input: &str) -> ParsedFeed {
    let mut parsed = ParsedFeed::default();

    for (index, caps) in RECORD_RE.captures_iter(input).enumerate() {
        let result = Entry::from_feed_fields(&caps[1], &caps[2], &caps[3], &caps[4])
            .and_then(|entry| {
                // A URL the domain cannot be derived from is unusable
                // for grouping; fatal for this record only.
                entry.domain()?;
                Ok(entry)
            });

        match result {
            Ok(entry) => parsed.entries.push(entry),
            Err(reason) => {
                warn!(index, %reason, "skipping record");
                parsed.skipped.push(SkippedRecord { index, reason });
            }
        }
    }

    debug!(
        entries = parsed.entries.len(),
        skipped = parsed.skipped.len(),
        "feed parse complete"
    );
    parsed
}
