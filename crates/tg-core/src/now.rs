//! Current-time marker.
//!
//! Models the periodic "now" line of a timeline view without reading the
//! wall clock: the caller supplies the time and decides when to tick.

use crate::time::{ClockTime, DisplayWindow};

/// Default interval between marker refreshes (one minute).
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 60_000;

/// Positions the current-time marker and decides when it needs a redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NowMarker {
    window: DisplayWindow,
    refresh_interval_ms: u64,
}

impl NowMarker {
    /// Create a marker for `window` refreshing every `refresh_interval_ms`.
    pub const fn new(window: DisplayWindow, refresh_interval_ms: u64) -> Self {
        Self {
            window,
            refresh_interval_ms,
        }
    }

    /// Percentage position of `time`, or `None` when it falls outside the window.
    pub fn position_at(&self, time: ClockTime) -> Option<f64> {
        let hour = time.hours();
        self.window
            .contains(hour)
            .then(|| self.window.position(hour))
    }

    /// Returns true if a redraw is due.
    ///
    /// A marker that has never been drawn is always due.
    pub fn is_due(&self, last_refresh_ms: Option<u64>, now_ms: u64) -> bool {
        match last_refresh_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.refresh_interval_ms,
            None => true,
        }
    }

    /// Return the configured interval.
    pub const fn refresh_interval_ms(&self) -> u64 {
        self.refresh_interval_ms
    }
}

impl Default for NowMarker {
    fn default() -> Self {
        Self::new(DisplayWindow::default(), DEFAULT_REFRESH_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> ClockTime {
        ClockTime::parse(s).unwrap()
    }

    #[test]
    fn position_inside_window() {
        let marker = NowMarker::default();
        let position = marker.position_at(at("13:30")).unwrap();
        assert!((position - 50.0).abs() < 1e-9);
    }

    #[test]
    fn window_edges_are_inside() {
        let marker = NowMarker::default();
        assert!(marker.position_at(at("07:00")).is_some());
        assert!(marker.position_at(at("20:00")).is_some());
    }

    #[test]
    fn outside_window_has_no_position() {
        let marker = NowMarker::default();
        assert_eq!(marker.position_at(at("06:59")), None);
        assert_eq!(marker.position_at(at("20:01")), None);
    }

    #[test]
    fn never_drawn_marker_is_due() {
        assert!(NowMarker::default().is_due(None, 0));
    }

    #[test]
    fn due_after_interval_elapses() {
        let marker = NowMarker::new(DisplayWindow::default(), 1_000);
        assert!(!marker.is_due(Some(5_000), 5_999));
        assert!(marker.is_due(Some(5_000), 6_000));
        // Clock going backwards never triggers a redraw.
        assert!(!marker.is_due(Some(5_000), 4_000));
    }
}
