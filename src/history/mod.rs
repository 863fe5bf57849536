// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Search history
//!
//! Records the searches a user ran (query, result count, active filters)
//! in a bounded, de-duplicated, most-recent-first list, and answers the
//! listing and aggregate queries the history view needs.

pub mod entry;
pub mod stats;
pub mod store;

pub use entry::{format_timestamp, parse_timestamp, FilterSet, SearchHistoryEntry};
pub use stats::{HistoryStatistics, PopularQuery};
pub use store::{SearchHistoryStore, DEFAULT_MAX_ENTRIES, DEFAULT_STORAGE_KEY};
