//! Dedupe/merge engine.

use tracing::{debug, warn};

use huginnmd_shared::{Entry, ReportCollection};

/// Counters from one merge pass, surfaced in the CLI summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// New entries appended to the collection.
    pub added: usize,
    /// New entries dropped because their bucket already had the title.
    pub duplicates: usize,
}

/// Fold freshly parsed entries into an existing collection.
///
/// Each entry lands in its agent/domain bucket (created on demand)
/// unless the bucket already holds an entry with the same title — agent
/// and domain are fixed by the bucket, so the title is the whole dedupe
/// key there. Existing entries are never removed, mutated, or reordered.
pub fn merge(mut existing: ReportCollection, new: Vec<Entry>) -> (ReportCollection, MergeStats) {
    let mut stats = MergeStats::default();

    for entry in new {
        let domain = match entry.domain() {
            Ok(domain) => domain.to_string(),
            Err(reason) => {
                // Parsers validate URLs before handing entries over;
                // this only fires on hand-built input.
                warn!(%reason, agent = %entry.agent_name, "entry skipped in merge");
                continue;
            }
        };

        let bucket = existing.bucket_mut(&entry.agent_name, &domain);
        if bucket.iter().any(|present| present.title == entry.title) {
            debug!(agent = %entry.agent_name, title = %entry.title, "duplicate title dropped");
            stats.duplicates += 1;
            continue;
        }
        bucket.push(entry);
        stats.added += 1;
    }

    (existing, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use huginnmd_shared::{DATE_FORMAT, unknown_date};

    fn entry(agent: &str, title: &str, url: &str) -> Entry {
        Entry::new(unknown_date(), agent, title, url).expect("test entry")
    }

    fn entry_at(date: &str, agent: &str, title: &str, url: &str) -> Entry {
        let date = DateTime::parse_from_str(date, DATE_FORMAT).expect("test date");
        Entry::new(date, agent, title, url).expect("test entry")
    }

    #[test]
    fn merge_into_empty_collection() {
        let (merged, stats) = merge(
            ReportCollection::new(),
            vec![
                entry("A", "one", "https://x.example/1"),
                entry("B", "two", "https://y.example/2"),
            ],
        );

        assert_eq!(stats, MergeStats { added: 2, duplicates: 0 });
        assert_eq!(merged.entry_count(), 2);
    }

    #[test]
    fn same_triple_different_timestamps_dedupes() {
        let first = entry_at(
            "2024-01-01 10:00:00 +0000",
            "Agent",
            "Title",
            "https://a.example/x",
        );
        let republished = entry_at(
            "2024-01-02 08:00:00 +0000",
            "Agent",
            "Title",
            "https://a.example/x",
        );

        let (merged, _) = merge(ReportCollection::new(), vec![first]);
        let (merged, stats) = merge(merged, vec![republished]);

        assert_eq!(stats, MergeStats { added: 0, duplicates: 1 });
        assert_eq!(merged.entry_count(), 1);
    }

    #[test]
    fn same_title_in_different_buckets_is_kept() {
        let (merged, stats) = merge(
            ReportCollection::new(),
            vec![
                entry("A", "Title", "https://x.example/1"),
                // Same title, different domain bucket.
                entry("A", "Title", "https://y.example/1"),
                // Same title, different agent bucket.
                entry("B", "Title", "https://x.example/1"),
            ],
        );

        assert_eq!(stats, MergeStats { added: 3, duplicates: 0 });
        assert_eq!(merged.entry_count(), 3);
    }

    #[test]
    fn existing_entries_survive_untouched() {
        let (existing, _) = merge(
            ReportCollection::new(),
            vec![
                entry("A", "kept", "https://x.example/1"),
                entry("A", "also kept", "https://x.example/2"),
            ],
        );

        let (merged, stats) = merge(
            existing,
            vec![
                entry("A", "kept", "https://x.example/1"),
                entry("A", "new", "https://x.example/3"),
            ],
        );

        assert_eq!(stats, MergeStats { added: 1, duplicates: 1 });
        let triples = merged.triples();
        assert_eq!(triples.len(), 3);
        assert!(triples.contains(&("A".into(), "x.example".into(), "also kept".into())));
        assert!(triples.contains(&("A".into(), "x.example".into(), "new".into())));
    }

    #[test]
    fn underivable_domain_is_skipped_not_fatal() {
        let bad = Entry::new(unknown_date(), "A", "bad", "no-scheme").unwrap();
        let (merged, stats) = merge(
            ReportCollection::new(),
            vec![bad, entry("A", "good", "https://x.example/1")],
        );

        assert_eq!(stats, MergeStats { added: 1, duplicates: 0 });
        assert_eq!(merged.entry_count(), 1);
    }
}
