//! Agent → domain → entries grouping for one report.

use std::collections::BTreeMap;

use crate::entry::Entry;
use crate::error::Result;

/// All entries for one report day, grouped by agent then domain.
///
/// `BTreeMap` keys give the renderer its lexicographic agent and domain
/// order; the `Vec` keeps insertion order within a domain (the renderer
/// sorts by title without mutating the stored order).
///
/// The collection is rebuilt from the rendered report on every run,
/// augmented with new entries, re-rendered, and discarded — the report
/// file on disk is the only persistent store.
#[derive(Debug, Clone, Default)]
pub struct ReportCollection {
    agents: BTreeMap<String, BTreeMap<String, Vec<Entry>>>,
}

impl ReportCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its agent/domain bucket, creating buckets as
    /// needed. No dedupe happens here; that is the merge engine's job.
    /// Fails only when the domain cannot be derived from the URL.
    pub fn insert(&mut self, entry: Entry) -> Result<()> {
        let domain = entry.domain()?.to_string();
        self.agents
            .entry(entry.agent_name.clone())
            .or_default()
            .entry(domain)
            .or_default()
            .push(entry);
        Ok(())
    }

    /// Mutable access to a domain bucket, creating it if absent.
    pub fn bucket_mut(&mut self, agent: &str, domain: &str) -> &mut Vec<Entry> {
        self.agents
            .entry(agent.to_string())
            .or_default()
            .entry(domain.to_string())
            .or_default()
    }

    /// Iterate agents in lexicographic order with their domain buckets.
    pub fn agents(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, Vec<Entry>>)> {
        self.agents.iter().map(|(agent, domains)| (agent.as_str(), domains))
    }

    /// Total entries for one agent across all its domains.
    pub fn agent_total(&self, agent: &str) -> usize {
        self.agents
            .get(agent)
            .map(|domains| domains.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Total entries across the whole collection.
    pub fn entry_count(&self) -> usize {
        self.agents
            .values()
            .flat_map(|domains| domains.values())
            .map(Vec::len)
            .sum()
    }

    /// Whether the collection holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    /// Flatten to sorted `(agent, domain, title)` triples — the
    /// date-independent identity view, handy for diffing collections.
    pub fn triples(&self) -> Vec<(String, String, String)> {
        let mut triples: Vec<_> = self
            .agents
            .iter()
            .flat_map(|(agent, domains)| {
                domains.iter().flat_map(move |(domain, entries)| {
                    entries
                        .iter()
                        .map(move |e| (agent.clone(), domain.clone(), e.title.clone()))
                })
            })
            .collect();
        triples.sort();
        triples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::unknown_date;

    fn entry(agent: &str, title: &str, url: &str) -> Entry {
        Entry::new(unknown_date(), agent, title, url).expect("test entry")
    }

    #[test]
    fn insert_groups_by_agent_and_domain() {
        let mut collection = ReportCollection::new();
        collection
            .insert(entry("A", "one", "https://x.example/1"))
            .unwrap();
        collection
            .insert(entry("A", "two", "https://y.example/2"))
            .unwrap();
        collection
            .insert(entry("B", "three", "https://x.example/3"))
            .unwrap();

        assert_eq!(collection.entry_count(), 3);
        assert_eq!(collection.agent_total("A"), 2);
        assert_eq!(collection.agent_total("B"), 1);
        assert_eq!(collection.agent_total("C"), 0);
    }

    #[test]
    fn insert_rejects_underivable_domain() {
        let mut collection = ReportCollection::new();
        let result = collection.insert(entry("A", "bad", "no-scheme"));
        assert!(result.is_err());
        assert!(collection.is_empty());
    }

    #[test]
    fn agents_iterate_sorted() {
        let mut collection = ReportCollection::new();
        collection
            .insert(entry("Zebra", "z", "https://z.example/1"))
            .unwrap();
        collection
            .insert(entry("Apple", "a", "https://a.example/1"))
            .unwrap();

        let names: Vec<_> = collection.agents().map(|(agent, _)| agent).collect();
        assert_eq!(names, vec!["Apple", "Zebra"]);
    }

    #[test]
    fn triples_flatten_identity_view() {
        let mut collection = ReportCollection::new();
        collection
            .insert(entry("A", "one", "https://x.example/1"))
            .unwrap();
        collection
            .insert(entry("A", "two", "https://x.example/2"))
            .unwrap();

        assert_eq!(
            collection.triples(),
            vec![
                ("A".into(), "x.example".into(), "one".into()),
                ("A".into(), "x.example".into(), "two".into()),
            ]
        );
    }
}
