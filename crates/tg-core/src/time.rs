//! Clock-time parsing and the percentage coordinate space of the display window.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ValidationError;

/// A time string that could not be parsed as `H:MM` or `HH:MM`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid time {input:?}: expected H:MM or HH:MM (24-hour)")]
pub struct TimeParseError {
    /// The rejected input, as given.
    pub input: String,
    #[source]
    source: chrono::ParseError,
}

/// A wall-clock time of day with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Parses `"H:MM"` or `"HH:MM"`, ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, TimeParseError> {
        NaiveTime::parse_from_str(input.trim(), "%H:%M")
            .map(Self)
            .map_err(|source| TimeParseError {
                input: input.to_string(),
                source,
            })
    }

    /// Builds a clock time from hour and minute components.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Real-valued hour of day: `hours + minutes / 60`.
    pub fn hours(self) -> f64 {
        f64::from(self.0.hour()) + f64::from(self.0.minute()) / 60.0
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(time: NaiveTime) -> Self {
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }
}

impl FromStr for ClockTime {
    type Err = TimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl Serialize for ClockTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a time string straight to its real-valued hour.
pub fn parse_hour(input: &str) -> Result<f64, TimeParseError> {
    ClockTime::parse(input).map(ClockTime::hours)
}

/// The hour range mapped onto the 0–100% axis of the timeline.
///
/// Positions are not clamped: times before `start_hour` map below 0 and
/// times after the window end map above 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayWindow {
    start_hour: f64,
    span_hours: f64,
}

impl DisplayWindow {
    /// The 7 AM – 8 PM window used by the timeline view.
    pub const DEFAULT: Self = Self {
        start_hour: 7.0,
        span_hours: 13.0,
    };

    /// Creates a window after validating that it has a positive, finite span.
    pub fn new(start_hour: f64, span_hours: f64) -> Result<Self, ValidationError> {
        if !start_hour.is_finite() || !span_hours.is_finite() || span_hours <= 0.0 {
            return Err(ValidationError::InvalidWindow {
                start_hour,
                span_hours,
            });
        }
        Ok(Self {
            start_hour,
            span_hours,
        })
    }

    /// First hour shown.
    pub const fn start_hour(&self) -> f64 {
        self.start_hour
    }

    /// Number of hours covered.
    pub const fn span_hours(&self) -> f64 {
        self.span_hours
    }

    /// Hour at which the window ends.
    pub fn end_hour(&self) -> f64 {
        self.start_hour + self.span_hours
    }

    /// Whether `hour` falls inside `[start_hour, end_hour]`.
    pub fn contains(&self, hour: f64) -> bool {
        (self.start_hour..=self.end_hour()).contains(&hour)
    }

    /// Percentage offset of `hour` into the window.
    pub fn position(&self, hour: f64) -> f64 {
        (hour - self.start_hour) / self.span_hours * 100.0
    }

    /// Percentage length of the span from `start_hour` to `end_hour`.
    pub fn duration(&self, start_hour: f64, end_hour: f64) -> f64 {
        (end_hour - start_hour) / self.span_hours * 100.0
    }
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'de> Deserialize<'de> for DisplayWindow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Bounds {
            start_hour: f64,
            span_hours: f64,
        }

        let bounds = Bounds::deserialize(deserializer)?;
        Self::new(bounds.start_hour, bounds.span_hours).map_err(serde::de::Error::custom)
    }
}
