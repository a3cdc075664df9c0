//! Best-effort parser for previously rendered reports.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use huginnmd_shared::{Entry, ReportCollection, unknown_date};

/// Matches an agent section heading: `## Agent: <name> (<count> entries)`.
static AGENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^## Agent: (.+?) \(\d+ entries\)[ \t]*$").expect("agent heading regex")
});

/// Matches one rendered entry: `**<title>** - [<text>](<url>)`.
static ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\* - \[(.*?)\]\((.*?)\)").expect("entry line regex"));

/// Re-extract entries from a rendered report.
///
/// Splits the document into agent blocks and collects every entry line
/// in each block, wherever it sits relative to `### Domain:` subsections
/// — the domain is always re-derived from the URL rather than trusted
/// from a heading. Content that does not match the grammar is dropped;
/// legacy or hand-edited reports degrade to a partial (possibly empty)
/// collection instead of an error.
///
/// Timestamps are not persisted in the rendered form, so re-read entries
/// carry a placeholder date. Entry identity ignores the date, so merging
/// is unaffected.
pub fn parse_report(content: &str) -> ReportCollection {
    let mut collection = ReportCollection::new();

    let headings: Vec<(usize, usize, String)> = AGENT_RE
        .captures_iter(content)
        .map(|caps| {
            let whole = caps.get(0).expect("whole match");
            (whole.start(), whole.end(), caps[1].trim().to_string())
        })
        .collect();

    for (i, (_, block_start, agent)) in headings.iter().enumerate() {
        let block_end = headings
            .get(i + 1)
            .map(|(next_start, _, _)| *next_start)
            .unwrap_or(content.len());
        let block = &content[*block_start..block_end];

        for caps in ENTRY_RE.captures_iter(block) {
            // Titles in a rendered report are already sanitized; store
            // them as-is. The URL is the link target, not the link text.
            let title = caps[1].to_string();
            let url = caps[3].trim().to_string();

            let Ok(entry) = Entry::new(unknown_date(), agent.clone(), title, url) else {
                continue;
            };
            if let Err(reason) = collection.insert(entry) {
                debug!(%reason, agent = %agent, "dropping entry with underivable domain");
            }
        }
    }

    debug!(
        agents = headings.len(),
        entries = collection.entry_count(),
        "report parse complete"
    );
    collection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
    }

    #[test]
    fn parse_sample_report() {
        let collection = parse_report(&fixture("report/sample-report.md"));

        assert_eq!(collection.entry_count(), 3);
        assert_eq!(collection.agent_total("HackerNewsAgent"), 2);
        assert_eq!(collection.agent_total("SecurityFeed"), 1);

        let triples = collection.triples();
        assert!(triples.contains(&(
            "HackerNewsAgent".into(),
            "blog.rust-lang.org".into(),
            r"Rust 1\.78 released".into()
        )));
    }

    #[test]
    fn domain_comes_from_url_not_heading() {
        // The heading lies about the domain; the URL wins.
        let content = "\
## Agent: A (1 entries)
### Domain: wrong.example
**Title** - [https://right.example/x](https://right.example/x)
";
        let collection = parse_report(content);
        assert_eq!(
            collection.triples(),
            vec![("A".into(), "right.example".into(), "Title".into())]
        );
    }

    #[test]
    fn front_matter_is_not_an_entry() {
        let content = "\
---
layout: post
title: Huginn RSS Report
categories: huginn update
date: 2024-05-04
---

* auto-gen TOC:
{:toc}

## Agent: A (1 entries)
### Domain: a.example
**One** - [https://a.example/1](https://a.example/1)
";
        let collection = parse_report(content);
        assert_eq!(collection.entry_count(), 1);
    }

    #[test]
    fn unmatched_content_degrades_silently() {
        assert!(parse_report("").is_empty());
        assert!(parse_report("just some prose, no headings").is_empty());

        // Legacy flat-list format: entries outside any agent block are
        // unattributable and dropped.
        let legacy = "**Old Title** - [https://old.example/x](https://old.example/x)\n";
        assert!(parse_report(legacy).is_empty());
    }

    #[test]
    fn partial_reports_keep_what_matches() {
        let content = "\
## Agent: A (2 entries)
### Domain: a.example
**Good** - [https://a.example/1](https://a.example/1)
this line is noise and does not match
**No Scheme** - [nowhere](nowhere)
";
        let collection = parse_report(content);
        // The schemeless entry cannot be grouped and is dropped.
        assert_eq!(
            collection.triples(),
            vec![("A".into(), "a.example".into(), "Good".into())]
        );
    }

    #[test]
    fn entries_count_in_heading_is_not_trusted() {
        // Heading claims 5 entries, block holds 1 — parse what is there.
        let content = "\
## Agent: A (5 entries)
### Domain: a.example
**Only** - [https://a.example/1](https://a.example/1)
";
        assert_eq!(parse_report(content).entry_count(), 1);
    }

    #[test]
    fn reparsed_entries_carry_placeholder_date() {
        let content = "\
## Agent: A (1 entries)
### Domain: a.example
**One** - [https://a.example/1](https://a.example/1)
";
        let collection = parse_report(content);
        let (_, domains) = collection.agents().next().unwrap();
        let entry = &domains["a.example"][0];
        assert_eq!(entry.date_published, unknown_date());
    }
}
