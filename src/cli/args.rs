// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for cinelog.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::history::FilterSet;

/// cinelog - search history for your streaming catalog
#[derive(Parser, Debug)]
#[command(name = "cinelog")]
#[command(version, about = "Search history for your streaming catalog")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding history data (overrides settings)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    History(HistoryCommands),

    /// Show or change settings
    #[command(alias = "config")]
    Settings(SettingsArgs),
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Record a completed search
    Add(AddArgs),

    /// List history, most recent first
    List {
        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show a single entry
    Show {
        /// Entry ID
        id: String,
    },

    /// Remove a single entry
    #[command(alias = "rm")]
    Remove {
        /// Entry ID
        id: String,
    },

    /// Clear all history
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Most frequently searched queries
    Popular {
        /// Maximum number of queries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Recently searched distinct queries
    Recent {
        /// Maximum number of queries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Find history entries whose query contains a term
    Search {
        /// Text to look for
        term: String,
    },

    /// Summary statistics
    Stats,
}

/// Arguments for the add subcommand
#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Query text as typed
    pub query: String,

    /// Number of results the search returned
    #[arg(short, long, default_value = "0")]
    pub results: u64,

    /// Content type filter (movie, tv, all)
    #[arg(short = 't', long = "type")]
    pub content_type: Option<String>,

    /// Release year filter
    #[arg(short, long)]
    pub year: Option<String>,

    /// Genre filter
    #[arg(short, long)]
    pub genre: Option<String>,

    /// Original language filter
    #[arg(short, long)]
    pub language: Option<String>,
}

impl AddArgs {
    /// Filters given on the command line, if any
    pub fn filters(&self) -> Option<FilterSet> {
        let filters = FilterSet {
            content_type: self.content_type.clone(),
            year: self.year.clone(),
            genre: self.genre.clone(),
            language: self.language.clone(),
        };
        if filters == FilterSet::default() {
            None
        } else {
            Some(filters)
        }
    }
}

/// Arguments for the settings subcommand
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print the effective settings
    Show,

    /// Change a setting (history.max_entries, history.storage_key, storage.data_dir)
    Set {
        /// Dotted setting name
        key: String,
        /// New value
        value: String,
    },

    /// Print the settings file location
    Path,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}
