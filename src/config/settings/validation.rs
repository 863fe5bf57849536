// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::PathBuf;

use crate::error::{CinelogError, Result};

use super::Settings;

/// Keys accepted by [`Settings::set_value`]
pub const SETTABLE_KEYS: &[&str] = &[
    "history.max_entries",
    "history.storage_key",
    "storage.data_dir",
];

impl Settings {
    /// Check the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.history.max_entries == 0 {
            return Err(CinelogError::Config(
                "history.max_entries must be at least 1".to_string(),
            ));
        }

        let key = self.history.storage_key.trim();
        if key.is_empty() {
            return Err(CinelogError::Config(
                "history.storage_key must not be empty".to_string(),
            ));
        }
        if key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(CinelogError::Config(format!(
                "history.storage_key '{}' must not contain path separators",
                key
            )));
        }

        Ok(())
    }

    /// Update one setting from its dotted name and a string value.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "history.max_entries" => {
                self.history.max_entries = value.trim().parse().map_err(|_| {
                    CinelogError::InvalidInput(format!(
                        "'{}' is not a valid entry count",
                        value
                    ))
                })?;
            }
            "history.storage_key" => {
                self.history.storage_key = value.trim().to_string();
            }
            "storage.data_dir" => {
                let value = value.trim();
                self.storage.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => {
                return Err(CinelogError::InvalidInput(format!(
                    "Unknown setting '{}'. Known settings: {}",
                    key,
                    SETTABLE_KEYS.join(", ")
                )));
            }
        }

        self.validate()
    }
}
