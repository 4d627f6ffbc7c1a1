//! Data models for performance tracking

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Timestamp layout used in the persisted store
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accumulated results for one glyph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceEntry {
    pub correct: u32,
    pub incorrect: u32,
    /// Local time of the most recent trial, second precision
    #[serde(with = "timestamp")]
    pub last_repeated: NaiveDateTime,
}

impl PerformanceEntry {
    /// Fresh entry with both counts at zero
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            correct: 0,
            incorrect: 0,
            last_repeated: truncate_to_second(at),
        }
    }

    /// Count one trial and stamp it
    pub fn observe(&mut self, success: bool, at: NaiveDateTime) {
        if success {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.last_repeated = truncate_to_second(at);
    }

    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Coarse review bucket derived from a [`PerformanceEntry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReviewInterval {
    OneDay,
    SevenDays,
}

impl ReviewInterval {
    pub fn days(self) -> u32 {
        match self {
            Self::OneDay => 1,
            Self::SevenDays => 7,
        }
    }
}

impl fmt::Display for ReviewInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneDay => f.write_str("1 day"),
            Self::SevenDays => f.write_str("7 days"),
        }
    }
}

/// Current local time, second precision
pub fn now_local() -> NaiveDateTime {
    truncate_to_second(Local::now().naive_local())
}

fn truncate_to_second(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(at: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&at.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
