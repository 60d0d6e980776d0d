//! Shared utilities for CLI commands.

use tg_core::DisplayWindow;

/// Formats a real-valued hour as `HH:MM`, rounding to the nearest minute.
#[allow(clippy::cast_possible_truncation)]
pub fn format_hour(hour: f64) -> String {
    let minutes = (hour * 60.0).round() as i64;
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}

/// Formats a window as `HH:MM-HH:MM`.
pub fn format_window(window: &DisplayWindow) -> String {
    format!(
        "{}-{}",
        format_hour(window.start_hour()),
        format_hour(window.end_hour())
    )
}
