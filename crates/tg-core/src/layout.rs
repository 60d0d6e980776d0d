//! Day layout algorithm.
//!
//! Turns a raw [`DaySchedule`] into positioned, overlap-annotated events for
//! a single-day timeline.
//!
//! # Algorithm Summary
//!
//! 1. Split every occupied slot into one event per line and map its time
//!    range into window percentages
//! 2. Collapse events sharing a continuation key into one block
//! 3. Flag events whose ranges intersect another event's range

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::event::PositionedEvent;
use crate::matcher::ContinuationMatcher;
use crate::schedule::{DaySchedule, TimeSlot};
use crate::time::{ClockTime, DisplayWindow, TimeParseError};
use crate::types::{MergePolicy, OverlapStage};

/// Configuration for a layout run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Hour range mapped onto 0–100%.
    #[serde(default)]
    pub window: DisplayWindow,

    /// Which same-key events are collapsed.
    /// Default: contiguous runs only.
    #[serde(default)]
    pub merge_policy: MergePolicy,

    /// Whether overlap is computed on the merged or the split list.
    /// Default: after merge.
    #[serde(default)]
    pub overlap_stage: OverlapStage,
}

/// A slot left out of the layout because its time range could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSlot {
    /// Position of the slot in the input schedule.
    pub slot_index: usize,
    /// Why the slot was rejected.
    pub error: TimeParseError,
}

/// Output of the split stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitOutcome {
    /// One event per entry, sorted by start position (stable).
    pub events: Vec<PositionedEvent>,
    /// Slots rejected for malformed times.
    pub skipped: Vec<SkippedSlot>,
}

/// Result of laying out one day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayLayout {
    /// Events in ascending start position.
    pub events: Vec<PositionedEvent>,
    /// Slots that could not be placed.
    pub skipped: Vec<SkippedSlot>,
}

impl DayLayout {
    /// Returns true if every occupied slot was placed.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Number of events flagged as overlapping.
    pub fn overlapping_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_overlapping).count()
    }
}

/// Lay out a day's schedule.
///
/// Slots with malformed times are skipped and reported in
/// [`DayLayout::skipped`]; the rest of the day is still laid out.
///
/// # Arguments
///
/// * `schedule` - The day's slots, in any order
/// * `matcher` - Extracts continuation keys from entry text
/// * `config` - Window, merge policy and overlap stage
pub fn layout_day<M>(schedule: &DaySchedule, matcher: &M, config: &LayoutConfig) -> DayLayout
where
    M: ContinuationMatcher + ?Sized,
{
    let SplitOutcome {
        mut events,
        skipped,
    } = split_schedule(schedule, &config.window, matcher);
    let split_count = events.len();

    let events = match config.overlap_stage {
        OverlapStage::BeforeMerge => {
            annotate_overlaps(&mut events);
            merge_continuations(events, &config.window, config.merge_policy)
        }
        OverlapStage::AfterMerge => {
            let mut merged = merge_continuations(events, &config.window, config.merge_policy);
            annotate_overlaps(&mut merged);
            merged
        }
    };

    let layout = DayLayout { events, skipped };
    tracing::debug!(
        slots = schedule.slots.len(),
        split = split_count,
        placed = layout.events.len(),
        overlapping = layout.overlapping_count(),
        skipped = layout.skipped.len(),
        "laid out day"
    );
    layout
}

// ========== Split & Normalize ==========

fn parse_range(slot: &TimeSlot) -> Result<(ClockTime, ClockTime), TimeParseError> {
    Ok((ClockTime::parse(&slot.start)?, ClockTime::parse(&slot.end)?))
}

/// Split every occupied slot into positioned events.
///
/// Each non-blank line of a slot becomes one event; all events from a slot
/// share its position and duration. The result is stably sorted by start
/// position, so ties keep input slot order.
pub fn split_schedule<M>(
    schedule: &DaySchedule,
    window: &DisplayWindow,
    matcher: &M,
) -> SplitOutcome
where
    M: ContinuationMatcher + ?Sized,
{
    let mut events = Vec::with_capacity(schedule.entry_count());
    let mut skipped = Vec::new();

    for (slot_index, slot) in schedule.slots.iter().enumerate() {
        let entries: Vec<&str> = slot.entries().map(str::trim).collect();
        if entries.is_empty() {
            continue;
        }

        let (start, end) = match parse_range(slot) {
            Ok(range) => range,
            Err(error) => {
                tracing::warn!(slot_index, %error, "skipping slot with malformed time");
                skipped.push(SkippedSlot { slot_index, error });
                continue;
            }
        };

        let start_position = window.position(start.hours());
        let duration = window.duration(start.hours(), end.hours());
        let total_splits = entries.len();

        for (split_index, text) in entries.into_iter().enumerate() {
            events.push(PositionedEvent {
                start,
                end,
                value: text.to_string(),
                start_position,
                duration,
                split_index,
                total_splits,
                continuation_group: matcher.key_for(text),
                is_overlapping: false,
                slot_index,
            });
        }
    }

    events.sort_by(|a, b| a.start_position.total_cmp(&b.start_position));

    SplitOutcome { events, skipped }
}

// ========== Continuation Merge ==========

/// Splits a key group into the runs that should each collapse to one event.
fn continuation_runs(
    events: &[PositionedEvent],
    group: &[usize],
    policy: MergePolicy,
) -> Vec<Vec<usize>> {
    match policy {
        MergePolicy::KeyOnly => vec![group.to_vec()],
        MergePolicy::Contiguous => {
            let mut runs: Vec<Vec<usize>> = Vec::new();
            for &index in group {
                let event = &events[index];
                let continues = runs
                    .last()
                    .and_then(|run| run.last())
                    .is_some_and(|&prev| events[prev].end == event.start);
                match runs.last_mut() {
                    Some(run) if continues => run.push(index),
                    _ => runs.push(vec![index]),
                }
            }
            runs
        }
    }
}

/// Collapse events sharing a continuation key.
///
/// Within each collapsible run the first event (in list order) is extended
/// to the last event's end and its duration recomputed; the other events are
/// dropped. Keyless events and singleton groups pass through unchanged, and
/// `value` is never modified.
///
/// Running this on its own output changes nothing.
pub fn merge_continuations(
    events: Vec<PositionedEvent>,
    window: &DisplayWindow,
    policy: MergePolicy,
) -> Vec<PositionedEvent> {
    let (extend_to, dropped) = {
        let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
        for (index, event) in events.iter().enumerate() {
            if let Some(key) = &event.continuation_group {
                groups.entry(key.as_str()).or_default().push(index);
            }
        }

        let mut extend_to: HashMap<usize, ClockTime> = HashMap::new();
        let mut dropped = vec![false; events.len()];
        for group in groups.values() {
            for run in continuation_runs(&events, group, policy) {
                let [head, rest @ ..] = run.as_slice() else {
                    continue;
                };
                let Some(&last) = rest.last() else {
                    continue;
                };
                extend_to.insert(*head, events[last].end);
                for &index in rest {
                    dropped[index] = true;
                }
            }
        }
        (extend_to, dropped)
    };

    if extend_to.is_empty() {
        return events;
    }

    let before = events.len();
    let merged: Vec<PositionedEvent> = events
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !dropped[*index])
        .map(|(index, mut event)| {
            if let Some(&end) = extend_to.get(&index) {
                event.end = end;
                event.duration = window.duration(event.start.hours(), end.hours());
            }
            event
        })
        .collect();

    tracing::debug!(
        runs = extend_to.len(),
        dropped = before - merged.len(),
        "merged continuations"
    );
    merged
}

// ========== Overlap Annotation ==========

/// Flag every event whose range intersects another event's range.
///
/// Ranges are half-open, so an event ending exactly where another starts
/// does not overlap it. Entries stacked in the same slot overlap each other.
pub fn annotate_overlaps(events: &mut [PositionedEvent]) {
    let flags: Vec<bool> = events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            events
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && event.overlaps(other))
        })
        .collect();

    for (event, flag) in events.iter_mut().zip(flags) {
        event.is_overlapping = flag;
    }
}
