// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Utility functions for cinelog
//!
//! Pure formatting helpers used by the command-line front end.

use chrono::{DateTime, Utc};
use crossterm::style::Color;

use crate::error::CinelogError;

/// Describe how long ago `timestamp` was, relative to `now`
///
/// "Just now", then minutes, hours, days and weeks; anything four weeks or
/// older is shown as a date.
pub fn format_time_ago(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let minutes = (*now - *timestamp).num_minutes();

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }

    let weeks = days / 7;
    if weeks < 4 {
        return format!("{}w ago", weeks);
    }

    timestamp.format("%Y-%m-%d").to_string()
}

/// Format a number with thousand separators for readability
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Shorten a query for single-line display, respecting char boundaries
pub fn truncate_query(query: &str, max_chars: usize) -> String {
    if query.chars().count() <= max_chars {
        return query.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let truncated: String = query.chars().take(keep).collect();
    format!("{}...", truncated)
}

/// Format an error for display to the user
pub fn format_error(error: &CinelogError) -> String {
    match error {
        CinelogError::Storage(_) => format!(
            "Error: {}\nHistory could not be saved. Free some space or run `cinelog clear --force`.",
            error
        ),
        _ => format!("Error: {}", error),
    }
}

/// Colour for a filter badge by facet name
pub fn filter_color(facet: &str) -> Color {
    match facet {
        "type" => Color::Red,
        "year" => Color::Blue,
        "genre" => Color::Green,
        "language" => Color::Magenta,
        _ => Color::Grey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    // ==================== format_time_ago tests ====================

    #[test]
    fn test_time_ago_just_now() {
        assert_eq!(format_time_ago(&now(), &now()), "Just now");
        assert_eq!(
            format_time_ago(&(now() - Duration::seconds(59)), &now()),
            "Just now"
        );
    }

    #[test]
    fn test_time_ago_minutes_hours_days_weeks() {
        assert_eq!(format_time_ago(&(now() - Duration::minutes(5)), &now()), "5m ago");
        assert_eq!(format_time_ago(&(now() - Duration::minutes(90)), &now()), "1h ago");
        assert_eq!(format_time_ago(&(now() - Duration::hours(30)), &now()), "1d ago");
        assert_eq!(format_time_ago(&(now() - Duration::days(15)), &now()), "2w ago");
    }

    #[test]
    fn test_time_ago_old_dates() {
        assert_eq!(
            format_time_ago(&(now() - Duration::days(40)), &now()),
            "2024-05-21"
        );
    }

    #[test]
    fn test_time_ago_future_timestamp() {
        assert_eq!(
            format_time_ago(&(now() + Duration::minutes(10)), &now()),
            "Just now"
        );
    }

    // ==================== format_count tests ====================

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    // ==================== truncate_query tests ====================

    #[test]
    fn test_truncate_query_short() {
        assert_eq!(truncate_query("Dune", 10), "Dune");
    }

    #[test]
    fn test_truncate_query_long() {
        let long = "a".repeat(50);
        let truncated = truncate_query(&long, 20);
        assert_eq!(truncated.chars().count(), 20);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_query_multibyte() {
        let truncated = truncate_query("千と千尋の神隠し", 5);
        assert_eq!(truncated, "千と...");
    }

    // ==================== format_error tests ====================

    #[test]
    fn test_format_error_storage_hint() {
        let err = CinelogError::storage("searchHistory", "disk full");
        let msg = format_error(&err);
        assert!(msg.contains("disk full"));
        assert!(msg.contains("cinelog clear"));
    }

    #[test]
    fn test_format_error_other() {
        let err = CinelogError::InvalidInput("bad id".to_string());
        assert_eq!(format_error(&err), "Error: Invalid input: bad id");
    }

    #[test]
    fn test_filter_color() {
        assert_eq!(filter_color("type"), Color::Red);
        assert_eq!(filter_color("unknown"), Color::Grey);
    }
}
