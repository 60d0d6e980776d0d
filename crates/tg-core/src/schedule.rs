//! Raw day schedules as supplied by the schedule-data provider.

use serde::{Deserialize, Serialize};

/// One time-ranged cell of the source schedule.
///
/// A single slot may stack several logical entries in `value`, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Start time as `H:MM` or `HH:MM`.
    pub start: String,
    /// End time as `H:MM` or `HH:MM`.
    pub end: String,
    /// Cell text; absent or empty means the slot is free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TimeSlot {
    /// Creates a slot with the given range and text.
    pub fn new(start: impl Into<String>, end: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            value: Some(value.into()),
        }
    }

    /// Logical entries stacked in this slot, in order.
    ///
    /// Lines are split on `\n` (a trailing `\r` is dropped) and blank lines
    /// are discarded.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.value
            .as_deref()
            .unwrap_or_default()
            .lines()
            .filter(|line| !line.trim().is_empty())
    }

    /// Whether the slot carries at least one entry.
    pub fn is_occupied(&self) -> bool {
        self.entries().next().is_some()
    }
}

/// All slots for one calendar day.
///
/// Slot order carries no meaning; the layout re-sorts by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DaySchedule {
    pub slots: Vec<TimeSlot>,
}

impl DaySchedule {
    /// Wraps a list of slots.
    pub const fn new(slots: Vec<TimeSlot>) -> Self {
        Self { slots }
    }

    /// Whether the day has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total entry count across all slots.
    pub fn entry_count(&self) -> usize {
        self.slots.iter().map(|slot| slot.entries().count()).sum()
    }
}

impl From<Vec<TimeSlot>> for DaySchedule {
    fn from(slots: Vec<TimeSlot>) -> Self {
        Self::new(slots)
    }
}

impl FromIterator<TimeSlot> for DaySchedule {
    fn from_iter<I: IntoIterator<Item = TimeSlot>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
