// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings commands

use std::io::Write;
use std::path::Path;

use crate::cli::args::{OutputFormat, SettingsCommands};
use crate::config::Settings;
use crate::error::Result;

/// Execute a settings command. `path` is the file `set` writes to.
pub fn execute<W: Write>(
    command: SettingsCommands,
    settings: &mut Settings,
    path: &Path,
    format: &OutputFormat,
    out: &mut W,
) -> Result<()> {
    match command {
        SettingsCommands::Show => {
            if matches!(format, OutputFormat::Json) {
                writeln!(out, "{}", serde_json::to_string_pretty(settings)?)?;
                return Ok(());
            }

            writeln!(out, "\nSettings ({})", path.display())?;
            writeln!(out, "─────────────────────────────────────")?;
            writeln!(out, "  history.max_entries:  {}", settings.history.max_entries)?;
            writeln!(out, "  history.storage_key:  {}", settings.history.storage_key)?;
            writeln!(out, "  storage.data_dir:     {}", settings.data_dir().display())?;
            writeln!(out, "─────────────────────────────────────\n")?;
        }

        SettingsCommands::Set { key, value } => {
            settings.set_value(&key, &value)?;
            settings.save_to(path)?;
            tracing::debug!(%key, "Updated setting");
            writeln!(out, "Set {} = {}", key, value.trim())?;
        }

        SettingsCommands::Path => {
            writeln!(out, "{}", path.display())?;
        }
    }

    Ok(())
}
