// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! History entry types
//!
//! Entries are persisted as camelCase JSON objects. Timestamps are written as
//! RFC 3339 strings and read leniently: older writers stored epoch
//! milliseconds, and anything unreadable is coerced to the current time.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Length of the random part of an entry id
const ID_SUFFIX_LEN: usize = 9;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Facet constraints applied to a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSet {
    /// Content type ("movie", "tv")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Release year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    /// Genre name or id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Original language code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl FilterSet {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Canonical form used for storage and comparison.
    ///
    /// Values are trimmed, blank values become absent, and a content type of
    /// `all` is the same as no content type.
    pub fn normalized(&self) -> Self {
        fn clean(value: &Option<String>) -> Option<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        }

        Self {
            content_type: clean(&self.content_type).filter(|t| !t.eq_ignore_ascii_case("all")),
            year: clean(&self.year),
            genre: clean(&self.genre),
            language: clean(&self.language),
        }
    }

    /// Whether any facet is set
    pub fn is_active(&self) -> bool {
        let n = self.normalized();
        n.content_type.is_some() || n.year.is_some() || n.genre.is_some() || n.language.is_some()
    }
}

/// One recorded search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub id: String,

    /// Trimmed query text
    pub query: String,

    /// When the search was recorded
    #[serde(
        default = "Utc::now",
        serialize_with = "serialize_timestamp",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: DateTime<Utc>,

    /// Number of results the search produced
    #[serde(default, deserialize_with = "deserialize_results_count")]
    pub results_count: u64,

    #[serde(default, deserialize_with = "deserialize_filters")]
    pub filters: FilterSet,
}

impl SearchHistoryEntry {
    /// Build a fresh entry stamped with `now`.
    ///
    /// The query is trimmed and the filters normalized; callers are expected
    /// to have rejected blank queries already.
    pub fn new(query: &str, results_count: u64, filters: FilterSet, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(now),
            query: query.trim().to_string(),
            timestamp: now,
            results_count,
            filters: filters.normalized(),
        }
    }

    /// Whether this entry records the same search intent as `query_key`
    /// (already normalized with [`normalize_query`]) under `filters`.
    pub fn matches_intent(&self, query_key: &str, filters: &FilterSet) -> bool {
        normalize_query(&self.query) == query_key && self.filters.normalized() == *filters
    }

    /// Parameters that re-run this search, in `q`, `type`, `year`, `genre`,
    /// `language` order with absent facets left out.
    pub fn search_params(&self) -> Vec<(&'static str, String)> {
        let filters = self.filters.normalized();
        let mut params = vec![("q", self.query.clone())];
        let facets = [
            ("type", filters.content_type),
            ("year", filters.year),
            ("genre", filters.genre),
            ("language", filters.language),
        ];
        params.extend(
            facets
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        );
        params
    }
}

/// Case-insensitive comparison key for a query
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Generate an entry id: epoch milliseconds followed by a random base-36 suffix
pub fn generate_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}{}", now.timestamp_millis(), suffix)
}

/// Format a timestamp the way it is persisted
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a persisted timestamp.
///
/// Accepts RFC 3339 strings, naive ISO-8601 date-times (taken as UTC), and
/// epoch milliseconds either as a number or a numeric string.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(naive.and_utc());
            }
            s.parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis)
        }
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    Ok(parse_timestamp(&raw).unwrap_or_else(|| {
        tracing::warn!("Unreadable history timestamp {}, using current time", raw);
        Utc::now()
    }))
}

/// Read a stored result count, accepting whole floats and numeric strings.
/// Anything else, including negatives, becomes 0.
fn deserialize_results_count<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<u64, D::Error> {
    let raw = Value::deserialize(deserializer)?;
    let count = match &raw {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f.round() as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Null => Some(0),
        _ => None,
    };
    Ok(count.unwrap_or_else(|| {
        tracing::warn!("Unreadable history result count {}, using 0", raw);
        0
    }))
}

fn deserialize_filters<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FilterSet, D::Error> {
    Ok(Option::<FilterSet>::deserialize(deserializer)?.unwrap_or_default())
}
