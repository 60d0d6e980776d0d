//! Key-to-style lookup for renderers.
//!
//! The engine only guarantees whether an event carries a continuation key.
//! Mapping keys to visual styles is up to the caller, who supplies the
//! palette explicitly.

use std::collections::HashMap;

use crate::event::PositionedEvent;
use crate::types::ContinuationKey;

/// An ordered table of style descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StylePalette<S> {
    styles: Vec<S>,
}

impl<S> StylePalette<S> {
    /// Wraps the given styles, in lookup order.
    pub const fn new(styles: Vec<S>) -> Self {
        Self { styles }
    }

    /// Number of styles in the table.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the table has no styles.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Style for slot `index`, wrapping around the table.
    ///
    /// Returns `None` only when the palette is empty.
    pub fn style_at(&self, index: usize) -> Option<&S> {
        self.styles.get(index.checked_rem(self.styles.len())?)
    }
}

impl<S> FromIterator<S> for StylePalette<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Styles assigned to the continuation keys of one layout.
///
/// Keys receive palette slots in the order they first appear.
#[derive(Debug, Clone)]
pub struct StyleAssignment<'p, S> {
    palette: &'p StylePalette<S>,
    slots: HashMap<ContinuationKey, usize>,
}

impl<'p, S> StyleAssignment<'p, S> {
    /// Assigns a palette slot to every distinct key in `events`.
    pub fn new(palette: &'p StylePalette<S>, events: &[PositionedEvent]) -> Self {
        let mut slots = HashMap::new();
        for key in events.iter().filter_map(|e| e.continuation_group.as_ref()) {
            let next = slots.len();
            slots.entry(key.clone()).or_insert(next);
        }
        Self { palette, slots }
    }

    /// Number of distinct keys seen.
    pub fn key_count(&self) -> usize {
        self.slots.len()
    }

    /// Style for `key`, or `None` if the key was not in the layout.
    pub fn style_for(&self, key: &ContinuationKey) -> Option<&'p S> {
        self.slots
            .get(key)
            .and_then(|&slot| self.palette.style_at(slot))
    }

    /// Style for an event; keyless events get `None` (the renderer default).
    pub fn style_for_event(&self, event: &PositionedEvent) -> Option<&'p S> {
        event
            .continuation_group
            .as_ref()
            .and_then(|key| self.style_for(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutConfig, layout_day};
    use crate::matcher::PatternMatcher;
    use crate::schedule::{DaySchedule, TimeSlot};

    fn palette() -> StylePalette<&'static str> {
        StylePalette::new(vec!["blue", "green", "orange"])
    }

    #[test]
    fn style_at_wraps_without_offset() {
        let palette = palette();
        assert_eq!(palette.style_at(0), Some(&"blue"));
        assert_eq!(palette.style_at(2), Some(&"orange"));
        assert_eq!(palette.style_at(3), Some(&"blue"));
        assert_eq!(palette.style_at(7), Some(&"green"));
    }

    #[test]
    fn every_index_resolves_in_non_empty_palette() {
        let palette = palette();
        assert!((0..100).all(|i| palette.style_at(i).is_some()));
    }

    #[test]
    fn empty_palette_has_no_styles() {
        let palette: StylePalette<&str> = StylePalette::new(vec![]);
        assert!(palette.is_empty());
        assert_eq!(palette.style_at(0), None);
    }

    #[test]
    fn keys_get_slots_in_first_seen_order() {
        let day: DaySchedule = vec![
            TimeSlot::new("08:00", "09:00", "MATH 2B 210"),
            TimeSlot::new("09:00", "10:00", "CE 1A 101\nLunch"),
            TimeSlot::new("11:00", "12:00", "PHYS 3C 300"),
            TimeSlot::new("13:00", "14:00", "BIO 4D 400"),
            TimeSlot::new("15:00", "16:00", "MATH 2B 210"),
        ]
        .into();
        let layout = layout_day(&day, &PatternMatcher::course_code(), &LayoutConfig::default());
        let palette = palette();
        let styles = StyleAssignment::new(&palette, &layout.events);

        assert_eq!(styles.key_count(), 4);
        let by_value: Vec<_> = layout
            .events
            .iter()
            .map(|e| (e.value.as_str(), styles.style_for_event(e).copied()))
            .collect();
        assert_eq!(
            by_value,
            vec![
                ("MATH 2B 210", Some("blue")),
                ("CE 1A 101", Some("green")),
                ("Lunch", None),
                ("PHYS 3C 300", Some("orange")),
                ("BIO 4D 400", Some("blue")),
                ("MATH 2B 210", Some("blue")),
            ]
        );
    }

    #[test]
    fn unknown_key_has_no_style() {
        let palette = palette();
        let styles = StyleAssignment::new(&palette, &[]);
        let key = ContinuationKey::new("CE 1A 101").unwrap();
        assert_eq!(styles.style_for(&key), None);
    }
}
