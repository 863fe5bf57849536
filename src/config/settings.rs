// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for cinelog
//!
//! Handles loading and saving settings from ~/.cinelog/settings.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::history::{DEFAULT_MAX_ENTRIES, DEFAULT_STORAGE_KEY};

mod io;
mod merge;
mod validation;

pub use validation::SETTABLE_KEYS;

/// Main settings structure, stored in ~/.cinelog/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    /// Search history retention
    #[serde(default)]
    pub history: HistoryConfig,

    /// Where history data is kept
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Search history configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryConfig {
    /// Maximum number of entries to keep
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Key the history is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

/// Storage location configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageConfig {
    /// Data directory (defaults to ~/.cinelog/data)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            storage_key: default_storage_key(),
        }
    }
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}
