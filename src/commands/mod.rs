// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Command dispatch
//!
//! Resolves settings, opens the history store on the configured data
//! directory and runs the requested subcommand.

pub mod history;
pub mod settings;

use std::io::Write;

use crate::cli::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::history::SearchHistoryStore;
use crate::storage::FilesystemStore;

/// Run a parsed command line, writing output to `out`
pub fn execute<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let settings_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load_from(&settings_path)?;

    match cli.command {
        Commands::Settings(args) => {
            settings::execute(args.command, &mut settings, &settings_path, &cli.format, out)
        }
        Commands::History(command) => {
            if let Some(dir) = cli.data_dir {
                settings.storage.data_dir = Some(dir);
            }
            settings.validate()?;

            let data_dir = settings.data_dir();
            tracing::debug!("Using history data in {:?}", data_dir);

            let store =
                SearchHistoryStore::with_config(FilesystemStore::new(data_dir), &settings.history);
            history::execute(&store, command, &cli.format, out)
        }
    }
}
