//! Watermark type.
//!
//! A watermark marks everything processed up to and including a point in time.
//! It is persisted as an ISO-8601 string and compared chronologically.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Formats accepted for timestamps without an explicit offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// 2000-01-01T01:00:01.000001Z, the watermark used before anything was indexed.
const INITIAL_MICROS: i64 = 946_688_401_000_001;

/// Error returned when a string is not a valid ISO-8601 timestamp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid watermark '{0}': expected an ISO-8601 timestamp")]
pub struct WatermarkParseError(pub String);

/// Timestamp boundary of already-processed film works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Watermark(DateTime<Utc>);

impl Watermark {
    /// Wrap a UTC timestamp.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Watermark of a store that has never been indexed.
    pub fn initial() -> Self {
        Self(DateTime::from_timestamp_micros(INITIAL_MICROS).unwrap_or_default())
    }

    /// Parse an ISO-8601 timestamp.
    ///
    /// Values with an offset are converted to UTC; values without one are
    /// taken to be UTC already.
    pub fn parse(value: &str) -> Result<Self, WatermarkParseError> {
        let trimmed = value.trim();

        if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(at.with_timezone(&Utc)));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(|naive| Self(naive.and_utc()))
            .ok_or_else(|| WatermarkParseError(value.to_string()))
    }

    /// The underlying timestamp.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Watermark {
    fn from(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl FromStr for Watermark {
    type Err = WatermarkParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Watermark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

impl Serialize for Watermark {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Watermark {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
