//! Core layout engine for the day timeline.
//!
//! This crate contains the fundamental types and logic for:
//! - Time normalization: parsing `HH:MM` and mapping hours into a display window
//! - Layout: splitting slots into events, merging continuations, flagging overlaps
//! - Styling: an explicit key-to-style palette for renderers

pub mod event;
mod layout;
pub mod matcher;
pub mod now;
pub mod schedule;
pub mod style;
pub mod time;
pub mod types;

pub use event::PositionedEvent;
pub use layout::{
    DayLayout, LayoutConfig, SkippedSlot, SplitOutcome, annotate_overlaps, layout_day,
    merge_continuations, split_schedule,
};
pub use matcher::{ContinuationMatcher, NoContinuation, PatternMatcher};
pub use now::NowMarker;
pub use schedule::{DaySchedule, TimeSlot};
pub use style::{StyleAssignment, StylePalette};
pub use time::{ClockTime, DisplayWindow, TimeParseError, parse_hour};
pub use types::{ContinuationKey, MergePolicy, OverlapStage, ValidationError};
