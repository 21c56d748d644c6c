// Event entity and its on-disk representation.
use crate::error::CommandError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of every timestamp in the events file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const CLOCK_FORMAT: &str = "%H:%M";

/// Start and end of an event, as time of day only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "serde_timestamp")]
    pub start: NaiveTime,
    #[serde(with = "serde_timestamp")]
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Parses `HH:MM-HH:MM`. Both halves must be valid 24h clock times.
    pub fn parse(raw: &str) -> Result<Self, CommandError> {
        let invalid = || CommandError::InvalidTimeFormat(raw.to_string());
        let (start, end) = raw.split_once('-').ok_or_else(invalid)?;
        let start = NaiveTime::parse_from_str(start.trim(), CLOCK_FORMAT).map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(end.trim(), CLOCK_FORMAT).map_err(|_| invalid())?;
        Ok(Self { start, end })
    }

    /// True when the range does not move forward in time (`end <= start`).
    pub fn is_inverted(&self) -> bool {
        self.end <= self.start
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(CLOCK_FORMAT),
            self.end.format(CLOCK_FORMAT)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    #[serde(rename = "datetime")]
    pub time_range: TimeRange,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Event {
    pub fn new(title: impl Into<String>, time_range: TimeRange, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            time_range,
            tags,
        }
    }

    /// Case-insensitive exact title comparison used for lookups.
    pub fn matches_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.time_range, self.title)?;
        if !self.tags.is_empty() {
            write!(f, "  {}", self.tags.join(" "))?;
        }
        Ok(())
    }
}

/// Times of day are stored as full timestamps on a fixed date.
mod serde_timestamp {
    use super::*;
    use serde::{Deserializer, Serializer, de};

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or_default()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        let stamp = NaiveDateTime::new(anchor(), *time);
        s.serialize_str(&stamp.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map(|dt| dt.time())
            .map_err(|e| de::Error::custom(format!("bad timestamp '{}': {}", raw, e)))
    }
}
