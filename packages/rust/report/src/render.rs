//! Canonical Markdown renderer.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use huginnmd_shared::ReportCollection;

/// Front-matter fields and report date for one render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// `layout:` front-matter value.
    pub layout: String,
    /// `title:` front-matter value.
    pub title: String,
    /// `categories:` front-matter value.
    pub categories: String,
    /// Report date, rendered as `YYYY-MM-DD` in the front matter.
    pub date: NaiveDate,
}

impl RenderOptions {
    /// Options with the stock front matter for a given date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            layout: "post".into(),
            title: "Huginn RSS Report".into(),
            categories: "huginn update".into(),
            date,
        }
    }
}

/// File name the report for `date` is stored under.
pub fn report_filename(date: NaiveDate, suffix: &str) -> String {
    format!("{}-{suffix}.md", date.format("%Y-%m-%d"))
}

/// Render the collection into the canonical report document.
///
/// Agents and domains appear in lexicographic order; entries within a
/// domain are ordered by title. `(<n> entries)` in an agent heading is
/// the agent's total across all its domains.
///
/// An entry line byte-identical to one already emitted in this document
/// is suppressed. The merge engine has already deduped, so a hit here
/// points at a merge bug and is logged loudly.
pub fn render(collection: &ReportCollection, opts: &RenderOptions) -> String {
    let mut out = String::new();
    out.push_str("---\n");
    out.push_str(&format!("layout: {}\n", opts.layout));
    out.push_str(&format!("title: {}\n", opts.title));
    out.push_str(&format!("categories: {}\n", opts.categories));
    out.push_str(&format!("date: {}\n", opts.date.format("%Y-%m-%d")));
    out.push_str("---\n\n* auto-gen TOC:\n{:toc}\n\n");

    let mut emitted: HashSet<String> = HashSet::new();

    for (agent, domains) in collection.agents() {
        out.push_str(&format!(
            "## Agent: {agent} ({} entries)\n",
            collection.agent_total(agent)
        ));

        for (domain, entries) in domains {
            out.push_str(&format!("### Domain: {domain}\n"));

            let mut ordered: Vec<_> = entries.iter().collect();
            ordered.sort_by(|a, b| a.title.cmp(&b.title));

            for entry in ordered {
                let line = entry.render_line();
                if !emitted.insert(line.clone()) {
                    warn!(%line, "duplicate entry reached the renderer, suppressed");
                    continue;
                }
                out.push_str(&line);
                out.push_str("\n\n");
            }
        }
    }

    debug!(bytes = out.len(), entries = emitted.len(), "report rendered");
    out
}
