//! In-memory fragment cache.
//!
//! One entry per canonical section id for the lifetime of the page. `Ready`
//! entries are written once and never replaced; `Failed` entries act as a
//! negative cache and may be evicted so an explicit navigation can retry.

use std::collections::{HashMap, HashSet};

use super::section_id::SectionId;

/// Extracted markup of a section plus the absolute URL it was fetched from.
///
/// `source_url` is what relative links inside the fragment are resolved
/// against when the markup is injected into the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRecord {
    pub html: String,
    pub source_url: String,
}

/// Cached outcome of loading a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    Ready(FragmentRecord),
    /// Load failed; `message` is the markup shown in place of content.
    Failed { message: String },
}

/// Section-id keyed fragment cache with in-flight request bookkeeping.
#[derive(Debug, Default)]
pub struct FragmentStore {
    entries: HashMap<SectionId, CacheEntry>,
    in_flight: HashSet<SectionId>,
}

impl FragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &SectionId) -> Option<CacheEntry> {
        self.entries.get(id).cloned()
    }

    /// Whether a fetch for `id` has started but not yet finished.
    pub fn is_loading(&self, id: &SectionId) -> bool {
        self.in_flight.contains(id)
    }

    /// Mark `id` as being fetched. Returns false if a fetch was already in
    /// flight, in which case the caller must wait instead of fetching again.
    pub fn begin_load(&mut self, id: &SectionId) -> bool {
        self.in_flight.insert(id.clone())
    }

    /// Record the outcome of a fetch and clear the in-flight mark.
    ///
    /// A `Ready` entry is never overwritten; if two fetches of the same id
    /// ever race to completion, the first result stays authoritative.
    pub fn finish_load(&mut self, id: &SectionId, entry: CacheEntry) {
        self.in_flight.remove(id);
        self.entries.entry(id.clone()).or_insert(entry);
    }

    /// Drop a negative-cache entry so the next load retries the fetch.
    /// `Ready` entries are immutable for the session and are kept.
    pub fn evict_failed(&mut self, id: &SectionId) {
        if matches!(self.entries.get(id), Some(CacheEntry::Failed { .. })) {
            self.entries.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> SectionId {
        SectionId::normalize(Some(raw), &[])
    }

    fn ready(html: &str) -> CacheEntry {
        CacheEntry::Ready(FragmentRecord {
            html: html.to_string(),
            source_url: "https://example.com/html/x.html".to_string(),
        })
    }

    #[test]
    fn first_ready_entry_wins() {
        let mut store = FragmentStore::new();
        let home = id("Home");
        store.finish_load(&home, ready("<p>first</p>"));
        store.finish_load(&home, ready("<p>second</p>"));
        assert_eq!(store.get(&home), Some(ready("<p>first</p>")));
    }

    #[test]
    fn in_flight_mark_deduplicates_fetches() {
        let mut store = FragmentStore::new();
        let sobre = id("Sobre");
        assert!(store.begin_load(&sobre));
        assert!(!store.begin_load(&sobre), "second fetch must wait");
        assert!(store.is_loading(&sobre));

        store.finish_load(&sobre, ready("<p>ok</p>"));
        assert!(!store.is_loading(&sobre));
    }

    #[test]
    fn failed_entries_are_cached_until_evicted() {
        let mut store = FragmentStore::new();
        let contato = id("Contato");
        let failure = CacheEntry::Failed {
            message: "<p>erro</p>".to_string(),
        };
        store.finish_load(&contato, failure.clone());
        assert_eq!(store.get(&contato), Some(failure));

        store.evict_failed(&contato);
        assert_eq!(store.get(&contato), None, "explicit retry path");
    }

    #[test]
    fn evict_failed_leaves_ready_entries_alone() {
        let mut store = FragmentStore::new();
        let home = id("Home");
        store.finish_load(&home, ready("<p>ok</p>"));
        store.evict_failed(&home);
        assert_eq!(store.get(&home), Some(ready("<p>ok</p>")));
    }
}
