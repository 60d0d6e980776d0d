//! Now command for placing the current-time marker.

use std::io::Write;

use anyhow::Result;
use chrono::Local;
use tg_core::ClockTime;

use super::util::format_window;
use crate::Config;

/// Writes where `at` (or the local wall-clock time) falls in the display window.
pub fn run<W: Write>(writer: &mut W, config: &Config, at: Option<ClockTime>) -> Result<()> {
    let time = at.unwrap_or_else(|| ClockTime::from(Local::now().time()));
    let marker = config.now_marker();
    let window = format_window(&config.window);

    match marker.position_at(time) {
        Some(position) => writeln!(writer, "{time} is at {position:.2}% of {window}")?,
        None => writeln!(writer, "{time} is outside the display window ({window})")?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn render(at: &str) -> String {
        let mut output = Vec::new();
        let at = ClockTime::parse(at).unwrap();
        run(&mut output, &Config::default(), Some(at)).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn now_inside_window() {
        assert_snapshot!(render("13:30"), @"13:30 is at 50.00% of 07:00-20:00");
    }

    #[test]
    fn now_outside_window() {
        assert_snapshot!(render("6:15"), @"06:15 is outside the display window (07:00-20:00)");
    }

    #[test]
    fn now_defaults_to_wall_clock() {
        let mut output = Vec::new();
        run(&mut output, &Config::default(), None).unwrap();
        assert!(!output.is_empty());
    }
}
