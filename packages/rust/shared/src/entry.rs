//! The feed entry model.

use chrono::{DateTime, FixedOffset};

use crate::error::{HuginnMdError, Result};

/// Fixed textual timestamp format used by the feed, e.g. `2024-01-01 10:00:00 +0000`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Characters that carry Markdown meaning and get backslash-escaped in titles.
const MARKDOWN_CHARS: &str = "\\`*_{}[]()#+-.!|";

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One feed item: publication date, producing agent, title, and URL.
///
/// Titles are stored sanitized — Markdown-escaped once when the entry is
/// built from feed text — and rendered verbatim afterwards. Two entries
/// are the same item when `agent_name`, `title`, and `url` all match;
/// `date_published` is not part of identity, so a re-publish of the same
/// item with a newer timestamp dedupes against the original.
#[derive(Debug, Clone)]
pub struct Entry {
    /// When the item was published, with explicit UTC offset.
    pub date_published: DateTime<FixedOffset>,
    /// Name of the agent that produced the item.
    pub agent_name: String,
    /// Sanitized (Markdown-escaped) title.
    pub title: String,
    /// Link target, `scheme://domain/path...`.
    pub url: String,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.agent_name == other.agent_name && self.title == other.title && self.url == other.url
    }
}

impl Eq for Entry {}

impl std::hash::Hash for Entry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.agent_name.hash(state);
        self.title.hash(state);
        self.url.hash(state);
    }
}

impl Entry {
    /// Construct an entry from already-typed parts.
    ///
    /// Fails with a validation error if any textual field is empty.
    /// The title is stored as given — callers building entries from raw
    /// feed text go through [`Entry::from_feed_fields`], which sanitizes.
    pub fn new(
        date_published: DateTime<FixedOffset>,
        agent_name: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self> {
        let agent_name = agent_name.into();
        let title = title.into();
        let url = url.into();

        for (name, value) in [
            ("agent_name", &agent_name),
            ("title", &title),
            ("url", &url),
        ] {
            if value.trim().is_empty() {
                return Err(HuginnMdError::validation(format!("empty {name}")));
            }
        }

        Ok(Self {
            date_published,
            agent_name,
            title,
            url,
        })
    }

    /// Construct an entry from raw feed captures.
    ///
    /// Trims every field, parses the timestamp against [`DATE_FORMAT`],
    /// and sanitizes the title. This is the only place escaping happens;
    /// everything downstream treats titles as already sanitized.
    pub fn from_feed_fields(date: &str, agent_name: &str, title: &str, url: &str) -> Result<Self> {
        let date = date.trim();
        if date.is_empty() {
            return Err(HuginnMdError::validation("empty date_published"));
        }
        let date_published = DateTime::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| HuginnMdError::malformed_date(date))?;

        Self::new(
            date_published,
            agent_name.trim(),
            escape_markdown(title.trim()),
            url.trim(),
        )
    }

    /// Host component of the URL: after `://`, before the next `/`.
    pub fn domain(&self) -> Result<&str> {
        domain_of(&self.url)
    }

    /// Markdown line for this entry: `**title** - [url](url)`.
    pub fn render_line(&self) -> String {
        format!("**{}** - [{}]({})", self.title, self.url, self.url)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Derive the domain from a URL without normalizing it.
///
/// The port stays part of the domain when present. A URL without `://`
/// has no derivable domain and is malformed.
pub fn domain_of(url: &str) -> Result<&str> {
    let rest = url
        .split_once("://")
        .ok_or_else(|| HuginnMdError::malformed_url(url))?
        .1;
    Ok(rest.split('/').next().unwrap_or(rest))
}

/// Escape Markdown-significant characters by prefixing each with a backslash.
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if MARKDOWN_CHARS.contains(ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Placeholder timestamp for entries re-read from a rendered report,
/// which does not persist time-of-day. Entry identity ignores it.
pub fn unknown_date() -> DateTime<FixedOffset> {
    DateTime::from_timestamp(0, 0)
        .expect("epoch is representable")
        .fixed_offset()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
