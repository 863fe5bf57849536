// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Aggregates over history entries

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::entry::{normalize_query, SearchHistoryEntry};

/// A query and how many entries carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopularQuery {
    /// Spelling of the most recent entry with this query
    pub query: String,
    pub count: usize,
}

/// Summary numbers for a history view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStatistics {
    pub total_searches: usize,
    pub unique_query_count: usize,
    /// Mean results per search, rounded half-up; 0 for an empty history
    pub average_results_per_search: u64,
    pub most_popular_query: Option<String>,
}

/// Count entries per case-insensitive query, most frequent first.
///
/// `entries` must be most-recent-first. Equal counts keep that order, so the
/// query searched more recently wins a tie.
pub fn popular_queries(entries: &[SearchHistoryEntry]) -> Vec<PopularQuery> {
    let mut ranked: Vec<PopularQuery> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let key = normalize_query(&entry.query);
        match positions.get(&key) {
            Some(&pos) => ranked[pos].count += 1,
            None => {
                positions.insert(key, ranked.len());
                ranked.push(PopularQuery {
                    query: entry.query.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Distinct queries in first-seen order, original spelling
pub fn recent_unique_queries(entries: &[SearchHistoryEntry], limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|e| seen.insert(normalize_query(&e.query)))
        .take(limit)
        .map(|e| e.query.clone())
        .collect()
}

pub fn statistics(entries: &[SearchHistoryEntry]) -> HistoryStatistics {
    let total_searches = entries.len();
    let unique_query_count = entries
        .iter()
        .map(|e| normalize_query(&e.query))
        .collect::<HashSet<_>>()
        .len();

    let average_results_per_search = if total_searches == 0 {
        0
    } else {
        // Widened so large counts cannot overflow; the mean always fits in u64
        let total_results: u128 = entries.iter().map(|e| u128::from(e.results_count)).sum();
        let searches = total_searches as u128;
        let rounded = (total_results * 2 + searches) / (searches * 2);
        u64::try_from(rounded).unwrap_or(u64::MAX)
    };

    HistoryStatistics {
        total_searches,
        unique_query_count,
        average_results_per_search,
        most_popular_query: popular_queries(entries).into_iter().next().map(|p| p.query),
    }
}
