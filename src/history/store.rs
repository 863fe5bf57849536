// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! History store implementation
//!
//! Keeps the whole history as one JSON array under a single storage key.
//! Every operation reads the array, works on it in memory and, for
//! mutations, writes the full array back before returning.

use chrono::Utc;

use super::entry::{normalize_query, FilterSet, SearchHistoryEntry};
use super::stats::{self, HistoryStatistics, PopularQuery};
use crate::config::HistoryConfig;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Storage key the history lives under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "searchHistory";

/// Number of entries retained unless configured otherwise
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Bounded, most-recent-first search history
pub struct SearchHistoryStore<S: KeyValueStore> {
    backend: S,
    storage_key: String,
    max_entries: usize,
}

impl<S: KeyValueStore> SearchHistoryStore<S> {
    /// Create a store with the default key and capacity
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }

    /// Create a store using the key and capacity from settings
    pub fn with_config(backend: S, config: &HistoryConfig) -> Self {
        Self::new(backend)
            .with_storage_key(config.storage_key.clone())
            .with_max_entries(config.max_entries)
    }

    /// Override the capacity (at least one entry is always kept)
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    /// Override the storage key
    pub fn with_storage_key(mut self, storage_key: impl Into<String>) -> Self {
        self.storage_key = storage_key.into();
        self
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Read the persisted entries.
    ///
    /// Backend failures propagate; unparseable data does not.
    fn load(&self) -> Result<Vec<SearchHistoryEntry>> {
        let mut entries = match self.backend.get(&self.storage_key)? {
            Some(raw) => decode_entries(&raw),
            None => Vec::new(),
        };
        entries.truncate(self.max_entries);
        Ok(entries)
    }

    /// Write the full collection back
    fn save(&self, entries: &[SearchHistoryEntry]) -> Result<()> {
        let content = serde_json::to_string(entries)?;
        self.backend.set(&self.storage_key, &content)?;
        tracing::debug!(
            key = %self.storage_key,
            entries = entries.len(),
            "Saved search history"
        );
        Ok(())
    }

    /// Record a completed search.
    ///
    /// Blank queries are ignored. An existing entry for the same query
    /// (case-insensitive) and filters is replaced by the new one at the front.
    pub fn add_entry(
        &self,
        query: &str,
        results_count: u64,
        filters: Option<FilterSet>,
    ) -> Result<()> {
        if query.trim().is_empty() {
            return Ok(());
        }

        let filters = filters.unwrap_or_default().normalized();
        let query_key = normalize_query(query);

        let mut entries = self.load()?;
        entries.retain(|e| !e.matches_intent(&query_key, &filters));
        entries.insert(
            0,
            SearchHistoryEntry::new(query, results_count, filters, Utc::now()),
        );
        entries.truncate(self.max_entries);

        self.save(&entries)
    }

    /// Get all history entries (most recent first)
    pub fn get_all_entries(&self) -> Vec<SearchHistoryEntry> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to read search history: {}", e);
            Vec::new()
        })
    }

    /// Get one entry by id
    pub fn get_entry(&self, id: &str) -> Option<SearchHistoryEntry> {
        self.get_all_entries().into_iter().find(|e| e.id == id)
    }

    /// Remove an entry by id. Unknown ids are ignored.
    pub fn remove_entry(&self, id: &str) -> Result<()> {
        let mut entries = self.load()?;
        let initial_len = entries.len();
        entries.retain(|e| e.id != id);

        if entries.len() < initial_len {
            self.save(&entries)?;
        }
        Ok(())
    }

    /// Clear all history
    pub fn clear_all(&self) -> Result<()> {
        self.backend.delete(&self.storage_key)
    }

    /// Most frequent queries, at most `limit`
    pub fn get_popular_queries(&self, limit: usize) -> Vec<PopularQuery> {
        let mut popular = stats::popular_queries(&self.get_all_entries());
        popular.truncate(limit);
        popular
    }

    /// Distinct queries in recency order, at most `limit`
    pub fn get_recent_unique_queries(&self, limit: usize) -> Vec<String> {
        stats::recent_unique_queries(&self.get_all_entries(), limit)
    }

    /// Entries whose query contains `term`, ignoring case
    pub fn search_within_history(&self, term: &str) -> Vec<SearchHistoryEntry> {
        let term_lower = term.to_lowercase();
        self.get_all_entries()
            .into_iter()
            .filter(|e| e.query.to_lowercase().contains(&term_lower))
            .collect()
    }

    pub fn get_statistics(&self) -> HistoryStatistics {
        stats::statistics(&self.get_all_entries())
    }
}

/// Decode a persisted array, dropping anything that is not a usable entry
fn decode_entries(raw: &str) -> Vec<SearchHistoryEntry> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!("Error parsing search history: {}", e);
            return Vec::new();
        }
    };

    values
        .into_iter()
        .filter_map(
            |value| match serde_json::from_value::<SearchHistoryEntry>(value) {
                Ok(entry) if !entry.query.trim().is_empty() => Some(entry),
                Ok(entry) => {
                    tracing::warn!("Skipping history entry {} with blank query", entry.id);
                    None
                }
                Err(e) => {
                    tracing::warn!("Skipping malformed history entry: {}", e);
                    None
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CinelogError;
    use crate::storage::MemoryStore;

    fn create_test_store() -> SearchHistoryStore<MemoryStore> {
        SearchHistoryStore::new(MemoryStore::new())
    }

    fn movie() -> Option<FilterSet> {
        Some(FilterSet::new().with_type("movie"))
    }

    /// Backend whose writes always fail
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<()> {
            Err(CinelogError::storage(key, "quota exceeded"))
        }

        fn delete(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    /// Backend whose reads always fail
    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Err(CinelogError::storage(key, "device not ready"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }

        fn delete(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_add_and_get() {
        let store = create_test_store();
        store.add_entry("  The Matrix ", 10, movie()).unwrap();

        let entries = store.get_all_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].query, "The Matrix");
        assert_eq!(entries[0].results_count, 10);
        assert_eq!(entries[0].filters, FilterSet::new().with_type("movie"));
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let store = create_test_store();
        store.add_entry("", 3, None).unwrap();
        store.add_entry("   \t", 3, movie()).unwrap();

        assert!(store.get_all_entries().is_empty());
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_dedup_moves_to_front_and_overwrites_count() {
        let store = create_test_store();
        store.add_entry("Matrix", 5, movie()).unwrap();
        let first = store.get_all_entries()[0].clone();
        store.add_entry("Other", 1, None).unwrap();
        store.add_entry("Matrix", 7, movie()).unwrap();

        let entries = store.get_all_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].query, "Matrix");
        assert_eq!(entries[0].results_count, 7);
        assert!(entries[0].timestamp >= first.timestamp);
        assert_eq!(entries[1].query, "Other");
    }

    #[test]
    fn test_dedup_is_case_insensitive() {
        let store = create_test_store();
        store.add_entry("Matrix", 5, movie()).unwrap();
        store.add_entry("MATRIX", 6, movie()).unwrap();

        let entries = store.get_all_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].query, "MATRIX");
    }

    #[test]
    fn test_different_filters_are_separate_entries() {
        let store = create_test_store();
        store.add_entry("Matrix", 5, movie()).unwrap();
        store
            .add_entry("Matrix", 2, Some(FilterSet::new().with_type("tv")))
            .unwrap();
        store.add_entry("Matrix", 9, None).unwrap();

        assert_eq!(store.get_all_entries().len(), 3);
    }

    #[test]
    fn test_absent_filters_equal_inactive_filters() {
        let store = create_test_store();
        store.add_entry("Matrix", 5, None).unwrap();
        store
            .add_entry(
                "Matrix",
                5,
                Some(FilterSet::new().with_type("all").with_year("")),
            )
            .unwrap();

        assert_eq!(store.get_all_entries().len(), 1);
    }

    #[test]
    fn test_max_entries() {
        let store = create_test_store();
        for i in 0..(DEFAULT_MAX_ENTRIES + 1) {
            store.add_entry(&format!("query{}", i), i as u64, None).unwrap();
        }

        let entries = store.get_all_entries();
        assert_eq!(entries.len(), DEFAULT_MAX_ENTRIES);
        assert_eq!(entries[0].query, format!("query{}", DEFAULT_MAX_ENTRIES));
        assert!(entries.iter().all(|e| e.query != "query0"));
    }

    #[test]
    fn test_custom_capacity() {
        let store = create_test_store().with_max_entries(2);
        store.add_entry("a", 0, None).unwrap();
        store.add_entry("b", 0, None).unwrap();
        store.add_entry("c", 0, None).unwrap();

        let queries: Vec<_> = store
            .get_all_entries()
            .into_iter()
            .map(|e| e.query)
            .collect();
        assert_eq!(queries, vec!["c", "b"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let store = create_test_store().with_max_entries(0);
        assert_eq!(store.max_entries(), 1);
    }

    #[test]
    fn test_remove_entry() {
        let store = create_test_store();
        store.add_entry("a", 0, None).unwrap();
        store.add_entry("b", 0, None).unwrap();
        let id = store.get_all_entries()[1].id.clone();

        store.remove_entry(&id).unwrap();

        let entries = store.get_all_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].query, "b");
        assert!(store.get_entry(&id).is_none());
    }

    #[test]
    fn test_remove_unknown_id_leaves_history_unchanged() {
        let store = create_test_store();
        store.add_entry("a", 0, None).unwrap();
        let before = store.backend().get(DEFAULT_STORAGE_KEY).unwrap();

        store.remove_entry("does-not-exist").unwrap();

        assert_eq!(store.backend().get(DEFAULT_STORAGE_KEY).unwrap(), before);
    }

    #[test]
    fn test_clear_all() {
        let store = create_test_store();
        store.add_entry("a", 4, None).unwrap();
        store.clear_all().unwrap();

        assert!(store.get_all_entries().is_empty());
        assert!(store.backend().get(DEFAULT_STORAGE_KEY).unwrap().is_none());

        let stats = store.get_statistics();
        assert_eq!(stats.total_searches, 0);
        assert!(stats.most_popular_query.is_none());
    }

    #[test]
    fn test_corrupt_data_reads_as_empty() {
        let store = create_test_store();
        store
            .backend()
            .set(DEFAULT_STORAGE_KEY, "{definitely not json")
            .unwrap();

        assert!(store.get_all_entries().is_empty());

        store.add_entry("fresh", 1, None).unwrap();
        assert_eq!(store.get_all_entries().len(), 1);
    }

    #[test]
    fn test_odd_result_counts_keep_entry() {
        let store = create_test_store();
        let raw = r#"[
            {"id": "1", "query": "Alien", "resultsCount": 12.0},
            {"id": "2", "query": "Heat", "resultsCount": -1}
        ]"#;
        store.backend().set(DEFAULT_STORAGE_KEY, raw).unwrap();

        let entries = store.get_all_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].results_count, 12);
        assert_eq!(entries[1].results_count, 0);
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let store = create_test_store();
        let raw = r#"[
            {"id": "1", "query": "Alien", "timestamp": 1700000000000, "resultsCount": 4, "filters": {}},
            {"id": "2", "timestamp": "2024-01-01T00:00:00.000Z"},
            {"id": "3", "query": "   "},
            "garbage",
            {"id": "4", "query": "Heat", "timestamp": "whenever", "resultsCount": 1}
        ]"#;
        store.backend().set(DEFAULT_STORAGE_KEY, raw).unwrap();

        let entries = store.get_all_entries();
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(entries[0].timestamp.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let store = SearchHistoryStore::new(FullStore);
        let err = store.add_entry("Matrix", 1, None).unwrap_err();
        assert!(matches!(err, CinelogError::Storage(_)));
    }

    #[test]
    fn test_read_failure_reads_empty_but_blocks_writes() {
        let store = SearchHistoryStore::new(UnreadableStore);

        assert!(store.get_all_entries().is_empty());
        assert!(store.add_entry("Matrix", 1, None).is_err());
        assert!(store.remove_entry("x").is_err());
    }

    #[test]
    fn test_popular_queries() {
        let store = create_test_store();
        store.add_entry("Matrix", 5, movie()).unwrap();
        store.add_entry("Inception", 3, None).unwrap();
        store.add_entry("matrix", 2, None).unwrap();

        let popular = store.get_popular_queries(3);
        assert_eq!(popular.len(), 2);
        assert_eq!(popular[0].query, "matrix");
        assert_eq!(popular[0].count, 2);
        assert_eq!(popular[1].query, "Inception");
        assert_eq!(popular[1].count, 1);

        assert_eq!(store.get_popular_queries(1).len(), 1);
    }

    #[test]
    fn test_recent_unique_queries_after_reorder() {
        let store = create_test_store();
        store.add_entry("A", 0, None).unwrap();
        store.add_entry("B", 0, None).unwrap();
        store.add_entry("A", 0, None).unwrap();

        assert_eq!(store.get_recent_unique_queries(2), vec!["A", "B"]);
    }

    #[test]
    fn test_search_within_history() {
        let store = create_test_store();
        store.add_entry("The Dark Knight", 3, None).unwrap();
        store.add_entry("Knives Out", 2, None).unwrap();
        store.add_entry("Dark", 9, movie()).unwrap();

        let results = store.search_within_history("DARK");
        let queries: Vec<_> = results.iter().map(|e| e.query.as_str()).collect();
        assert_eq!(queries, vec!["Dark", "The Dark Knight"]);

        assert_eq!(store.search_within_history("").len(), 3);
        assert!(store.search_within_history("zzz").is_empty());
    }

    #[test]
    fn test_statistics() {
        let store = create_test_store();
        store.add_entry("Matrix", 4, movie()).unwrap();
        store.add_entry("Matrix", 5, None).unwrap();
        store.add_entry("Heat", 0, None).unwrap();

        let stats = store.get_statistics();
        assert_eq!(stats.total_searches, 3);
        assert_eq!(stats.unique_query_count, 2);
        assert_eq!(stats.average_results_per_search, 3);
        assert_eq!(stats.most_popular_query.as_deref(), Some("Matrix"));
    }

    #[test]
    fn test_custom_storage_key() {
        let store = create_test_store().with_storage_key("profile-1");
        store.add_entry("Matrix", 1, None).unwrap();

        assert!(store.backend().get("profile-1").unwrap().is_some());
        assert!(store.backend().get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_with_config() {
        let config = HistoryConfig {
            max_entries: 5,
            storage_key: "custom".to_string(),
        };
        let store = SearchHistoryStore::with_config(MemoryStore::new(), &config);

        assert_eq!(store.max_entries(), 5);
        assert_eq!(store.storage_key(), "custom");
    }
}
