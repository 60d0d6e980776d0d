//! Layout command for rendering a day schedule as timeline blocks.
//!
//! This module implements `tg layout` with human-readable and JSON output.

use std::fmt::Write as _;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tg_core::{DayLayout, DaySchedule, DisplayWindow, PositionedEvent, StyleAssignment, layout_day};

use super::util::format_window;
use crate::Config;
use crate::cli::LayoutArgs;

// ========== Input ==========

/// Reads a day schedule from `path`, or from stdin when `path` is `None`.
///
/// Empty input and a JSON `null` both mean "no schedule" and yield an
/// empty day.
pub fn read_schedule(path: Option<&Path>) -> Result<DaySchedule> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read schedule from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read schedule from stdin")?;
            buf
        }
    };
    parse_schedule(&content)
}

/// Parses schedule JSON: an array of slots, `null`, or nothing at all.
pub fn parse_schedule(content: &str) -> Result<DaySchedule> {
    if content.trim().is_empty() {
        return Ok(DaySchedule::default());
    }
    let schedule: Option<DaySchedule> =
        serde_json::from_str(content).context("failed to parse schedule JSON")?;
    Ok(schedule.unwrap_or_default())
}

/// Applies per-run flag overrides on top of the loaded configuration.
pub fn apply_overrides(config: &mut Config, args: &LayoutArgs) -> Result<()> {
    if args.start_hour.is_some() || args.span_hours.is_some() {
        config.window = DisplayWindow::new(
            args.start_hour.unwrap_or(config.window.start_hour()),
            args.span_hours.unwrap_or(config.window.span_hours()),
        )
        .context("invalid display window")?;
    }
    if let Some(policy) = args.merge_policy {
        config.merge_policy = policy;
    }
    if let Some(stage) = args.overlap_stage {
        config.overlap_stage = stage;
    }
    if args.no_merge {
        config.continuation_pattern = Some(String::new());
    }
    Ok(())
}

// ========== Human Output ==========

fn write_row(output: &mut String, cells: [&str; 6]) {
    let [time, start, length, stack, overlap, value] = cells;
    writeln!(
        output,
        "{time:<11}  {start:>7}  {length:>7}  {stack:>5}  {overlap:<7}  {value}"
    )
    .unwrap();
}

/// Formats the human-readable layout table.
pub fn format_layout(
    layout: &DayLayout,
    window: &DisplayWindow,
    styles: &StyleAssignment<'_, String>,
) -> String {
    let mut output = String::new();

    let count = layout.events.len();
    let noun = if count == 1 { "event" } else { "events" };
    writeln!(output, "TIMELINE {} ({count} {noun})", format_window(window)).unwrap();
    writeln!(output).unwrap();

    if layout.events.is_empty() {
        writeln!(output, "No events scheduled.").unwrap();
    } else {
        write_row(
            &mut output,
            ["TIME", "START", "LENGTH", "STACK", "OVERLAP", "VALUE"],
        );
        for event in &layout.events {
            let time = format!("{}-{}", event.start, event.end);
            let start = format!("{:.2}%", event.start_position);
            let length = format!("{:.2}%", event.duration);
            let stack = format!("{}/{}", event.split_index + 1, event.total_splits);
            let overlap = if event.is_overlapping { "yes" } else { "" };
            let value = match styles.style_for_event(event) {
                Some(style) => format!("{} [{style}]", event.value),
                None => event.value.clone(),
            };
            write_row(&mut output, [&time, &start, &length, &stack, overlap, &value]);
        }
    }

    if !layout.skipped.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "SKIPPED").unwrap();
        for skipped in &layout.skipped {
            writeln!(output, "  slot {}: {}", skipped.slot_index, skipped.error).unwrap();
        }
    }

    output
}

// ========== JSON Output ==========

/// JSON layout structure.
#[derive(Debug, Serialize)]
pub struct JsonLayout<'a> {
    pub window: &'a DisplayWindow,
    pub events: Vec<JsonEvent<'a>>,
    pub skipped: Vec<JsonSkipped<'a>>,
}

#[derive(Debug, Serialize)]
pub struct JsonEvent<'a> {
    #[serde(flatten)]
    pub event: &'a PositionedEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct JsonSkipped<'a> {
    pub slot_index: usize,
    pub input: &'a str,
    pub error: String,
}

/// Formats the layout as JSON.
pub fn format_layout_json(
    layout: &DayLayout,
    window: &DisplayWindow,
    styles: &StyleAssignment<'_, String>,
) -> Result<String> {
    let report = JsonLayout {
        window,
        events: layout
            .events
            .iter()
            .map(|event| JsonEvent {
                event,
                style: styles.style_for_event(event).map(String::as_str),
            })
            .collect(),
        skipped: layout
            .skipped
            .iter()
            .map(|s| JsonSkipped {
                slot_index: s.slot_index,
                input: &s.error.input,
                error: s.error.to_string(),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the layout command, writing the rendered layout to `writer`.
///
/// With `strict`, any skipped slot turns into an error after the output has
/// been written.
pub fn run<W: Write>(
    writer: &mut W,
    schedule: &DaySchedule,
    config: &Config,
    json: bool,
    strict: bool,
) -> Result<DayLayout> {
    let matcher = config.matcher()?;
    let layout = layout_day(schedule, matcher.as_ref(), &config.layout_config());

    let palette = config.style_palette();
    let styles = StyleAssignment::new(&palette, &layout.events);

    if json {
        writeln!(writer, "{}", format_layout_json(&layout, &config.window, &styles)?)?;
    } else {
        write!(writer, "{}", format_layout(&layout, &config.window, &styles))?;
    }

    if strict && !layout.is_complete() {
        anyhow::bail!(
            "{} slot(s) skipped because of malformed times",
            layout.skipped.len()
        );
    }

    Ok(layout)
}
