// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! History commands

use std::io::Write;

use chrono::Utc;
use crossterm::style::Stylize;

use crate::cli::args::{HistoryCommands, OutputFormat};
use crate::error::{CinelogError, Result};
use crate::history::{SearchHistoryEntry, SearchHistoryStore};
use crate::storage::KeyValueStore;
use crate::utils;

/// Widest query shown in list views
const QUERY_DISPLAY_WIDTH: usize = 48;

/// Execute a history command against `store`, writing to `out`
pub fn execute<S: KeyValueStore, W: Write>(
    store: &SearchHistoryStore<S>,
    command: HistoryCommands,
    format: &OutputFormat,
    out: &mut W,
) -> Result<()> {
    let json = matches!(format, OutputFormat::Json);

    match command {
        HistoryCommands::Add(args) => {
            let filters = args.filters();
            store.add_entry(&args.query, args.results, filters)?;

            if args.query.trim().is_empty() {
                tracing::debug!("Ignoring blank query");
                if !json {
                    writeln!(out, "Nothing recorded: query is empty.")?;
                }
                return Ok(());
            }

            let entry = store.get_all_entries().into_iter().next();
            if json {
                write_json(out, &entry)?;
            } else if let Some(entry) = entry {
                writeln!(out, "Recorded '{}' ({}).", entry.query, entry.id)?;
            }
        }

        HistoryCommands::List { limit } => {
            let mut entries = store.get_all_entries();
            if let Some(limit) = limit {
                entries.truncate(limit);
            }

            if json {
                return write_json(out, &entries);
            }
            if entries.is_empty() {
                writeln!(out, "\nNo searches in history.\n")?;
                return Ok(());
            }

            writeln!(out, "\nRecent searches:\n")?;
            write_entries(out, &entries)?;
            writeln!(out)?;
        }

        HistoryCommands::Show { id } => {
            let entry = store.get_entry(&id).ok_or_else(|| {
                CinelogError::InvalidInput(format!("No history entry with id '{}'", id))
            })?;

            if json {
                return write_json(out, &entry);
            }

            writeln!(out, "\nEntry: {}", entry.id)?;
            writeln!(out, "Query: {}", entry.query)?;
            writeln!(
                out,
                "Searched: {} ({})",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                utils::format_time_ago(&entry.timestamp, &Utc::now())
            )?;
            writeln!(
                out,
                "Results: {}",
                utils::format_count(entry.results_count)
            )?;
            if entry.filters.is_active() {
                writeln!(out, "Filters:{}", filter_badges(&entry))?;
            }

            writeln!(out, "\nTo search again:")?;
            for (name, value) in entry.search_params() {
                writeln!(out, "  {} = {}", name, value)?;
            }
            writeln!(out)?;
        }

        HistoryCommands::Remove { id } => {
            let existed = store.get_entry(&id).is_some();
            store.remove_entry(&id)?;

            if json {
                return write_json(out, &serde_json::json!({ "id": id, "removed": existed }));
            }
            if existed {
                writeln!(out, "Entry removed.")?;
            } else {
                writeln!(out, "Entry not found.")?;
            }
        }

        HistoryCommands::Clear { force } => {
            if !force {
                writeln!(out, "This will delete ALL search history.")?;
                writeln!(out, "Run with --force to confirm.")?;
                return Ok(());
            }

            let count = store.get_all_entries().len();
            store.clear_all()?;
            tracing::info!(count, "Cleared search history");

            if json {
                return write_json(out, &serde_json::json!({ "cleared": count }));
            }
            writeln!(out, "Cleared {} searches from history.", count)?;
        }

        HistoryCommands::Popular { limit } => {
            let popular = store.get_popular_queries(limit);

            if json {
                return write_json(out, &popular);
            }
            if popular.is_empty() {
                writeln!(out, "\nNo searches in history.\n")?;
                return Ok(());
            }

            writeln!(out, "\nPopular searches:\n")?;
            for (rank, item) in popular.iter().enumerate() {
                let times = if item.count == 1 { "search" } else { "searches" };
                writeln!(
                    out,
                    "  {:>2}. {} ({} {})",
                    rank + 1,
                    utils::truncate_query(&item.query, QUERY_DISPLAY_WIDTH),
                    item.count,
                    times
                )?;
            }
            writeln!(out)?;
        }

        HistoryCommands::Recent { limit } => {
            let recent = store.get_recent_unique_queries(limit);

            if json {
                return write_json(out, &recent);
            }
            for query in recent {
                writeln!(out, "{}", query)?;
            }
        }

        HistoryCommands::Search { term } => {
            let results = store.search_within_history(&term);

            if json {
                return write_json(out, &results);
            }
            if results.is_empty() {
                writeln!(out, "\nNo searches matching '{}'.\n", term)?;
                return Ok(());
            }

            writeln!(out, "\nSearches matching '{}':\n", term)?;
            write_entries(out, &results)?;
            writeln!(out)?;
        }

        HistoryCommands::Stats => {
            let stats = store.get_statistics();

            if json {
                return write_json(out, &stats);
            }

            writeln!(out, "\nSearch History Statistics")?;
            writeln!(out, "─────────────────────────────────────")?;
            writeln!(out, "  Total searches:   {}", stats.total_searches)?;
            writeln!(out, "  Unique queries:   {}", stats.unique_query_count)?;
            writeln!(
                out,
                "  Avg. results:     {}",
                utils::format_count(stats.average_results_per_search)
            )?;
            writeln!(
                out,
                "  Most popular:     {}",
                stats.most_popular_query.as_deref().unwrap_or("(none)")
            )?;
            writeln!(out, "─────────────────────────────────────\n")?;
        }
    }

    Ok(())
}

fn write_json<W: Write, T: serde::Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn write_entries<W: Write>(out: &mut W, entries: &[SearchHistoryEntry]) -> Result<()> {
    let now = Utc::now();
    for entry in entries {
        writeln!(
            out,
            "  {} | {:>9} | {} | {} results{}",
            entry.id,
            utils::format_time_ago(&entry.timestamp, &now),
            utils::truncate_query(&entry.query, QUERY_DISPLAY_WIDTH),
            utils::format_count(entry.results_count),
            filter_badges(entry)
        )?;
    }
    Ok(())
}

/// Coloured ` [name: value]` badges for the active filters of an entry
fn filter_badges(entry: &SearchHistoryEntry) -> String {
    entry
        .search_params()
        .into_iter()
        .filter(|(name, _)| *name != "q")
        .map(|(name, value)| {
            format!(
                " {}",
                format!("[{}: {}]", name, value).with(utils::filter_color(name))
            )
        })
        .collect()
}
