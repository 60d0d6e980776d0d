//! Positioned events produced by the layout engine.

use serde::{Deserialize, Serialize};

use crate::time::ClockTime;
use crate::types::ContinuationKey;

/// One logical entry placed on the day timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedEvent {
    /// Start of the covered range (after any continuation merge).
    pub start: ClockTime,
    /// End of the covered range (after any continuation merge).
    pub end: ClockTime,
    /// The entry's text: one line of the source slot.
    pub value: String,
    /// Percentage offset into the display window.
    pub start_position: f64,
    /// Percentage length of the range.
    pub duration: f64,
    /// Index among entries stacked in the same source slot.
    pub split_index: usize,
    /// Number of entries stacked in the same source slot.
    pub total_splits: usize,
    /// Key shared by entries that belong to one ongoing activity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_group: Option<ContinuationKey>,
    /// Whether the range intersects another event's range.
    #[serde(default)]
    pub is_overlapping: bool,
    /// Position of the source slot in the input schedule.
    pub slot_index: usize,
}

impl PositionedEvent {
    /// Percentage offset at which the event ends.
    pub fn end_position(&self) -> f64 {
        self.start_position + self.duration
    }

    /// Whether two events' half-open ranges share at least an instant.
    ///
    /// Positions are linear in clock time, so the test runs on the clock
    /// times themselves, where boundaries compare exactly.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(other.start >= self.end || self.start >= other.end)
    }
}
