// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! cinelog - search history for a streaming-catalog client.
//!
//! This crate exposes the history runtime used by:
//! - the `cinelog` CLI (`src/main.rs`)
//! - any front end that records searches and renders a history view
//!
//! Architecture highlights:
//! - `history`: bounded, de-duplicated search history and its aggregates
//! - `storage`: key-value persistence seam (filesystem and in-memory)
//! - `config`: settings file with history capacity and data location
//! - `cli`, `commands`: argument parsing and command execution

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod storage;
pub mod utils;

pub use error::{CinelogError, Result};
pub use history::{FilterSet, SearchHistoryEntry, SearchHistoryStore};
pub use storage::{FilesystemStore, KeyValueStore, MemoryStore};
