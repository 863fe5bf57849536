// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Filesystem storage backend
//!
//! Stores each key as an individual JSON file inside a data directory.

use std::path::PathBuf;

use super::KeyValueStore;
use crate::error::{CinelogError, Result};

/// Filesystem-based storage backend
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    /// Directory holding one file per key
    base_path: PathBuf,
}

impl FilesystemStore {
    /// Create a new filesystem backend rooted at `base_path`
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the full path for a key
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.contains('/')
            || key.contains('\\')
            || key.contains("..")
        {
            return Err(CinelogError::InvalidInput(format!(
                "Invalid storage key '{}'",
                key
            )));
        }
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FilesystemStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path).map_err(|e| CinelogError::storage(key, e))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        // Ensure directory exists
        if !self.base_path.exists() {
            std::fs::create_dir_all(&self.base_path).map_err(|e| CinelogError::storage(key, e))?;
        }

        std::fs::write(&path, value).map_err(|e| CinelogError::storage(key, e))?;
        tracing::debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;

        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| CinelogError::storage(key, e))?;
        }

        Ok(())
    }
}
