// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for cinelog
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Main error type for cinelog operations
#[derive(Error, Debug)]
pub enum CinelogError {
    /// The persistence medium refused a read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CinelogError {
    /// Wrap a backend failure for `key` as a storage error.
    pub fn storage(key: &str, err: impl std::fmt::Display) -> Self {
        CinelogError::Storage(format!("{}: {}", key, err))
    }
}

/// Result type alias for cinelog operations
pub type Result<T> = std::result::Result<T, CinelogError>;
