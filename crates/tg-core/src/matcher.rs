//! Continuation-key extraction.
//!
//! A matcher decides which events represent the same ongoing activity. The
//! layout engine never interprets event text itself; it only asks the
//! matcher for a key.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::ContinuationKey;

/// Default pattern for activity codes such as `CE 1A 101` or `MATH 2B 210`:
/// a subject, a group code and a room or section number.
pub const COURSE_CODE_PATTERN: &str = r"\b([A-Z]{2,6}\s+\d[A-Z]\s+\d{2,4})\b";

/// Pre-compiled course code regex.
static COURSE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(COURSE_CODE_PATTERN).unwrap());

/// Extracts a continuation key from a single entry's text.
///
/// This trait allows the layout to work with different key formats
/// (course codes, ticket numbers, test fixtures).
pub trait ContinuationMatcher: Send + Sync {
    /// Returns the key identifying the activity `text` belongs to, if any.
    fn key_for(&self, text: &str) -> Option<ContinuationKey>;
}

impl<F> ContinuationMatcher for F
where
    F: Fn(&str) -> Option<ContinuationKey> + Send + Sync,
{
    fn key_for(&self, text: &str) -> Option<ContinuationKey> {
        self(text)
    }
}

/// Never yields a key, which disables continuation merging.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContinuation;

impl ContinuationMatcher for NoContinuation {
    fn key_for(&self, _text: &str) -> Option<ContinuationKey> {
        None
    }
}

/// Regex-backed matcher.
///
/// The key is capture group 1 when the pattern has one, otherwise the whole
/// match. Surrounding whitespace is trimmed; an empty capture is no key.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Regex,
}

impl PatternMatcher {
    /// Compiles `pattern` into a matcher.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Matcher for course-style activity codes.
    pub fn course_code() -> Self {
        Self {
            pattern: COURSE_CODE_RE.clone(),
        }
    }

    /// The source pattern.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl ContinuationMatcher for PatternMatcher {
    fn key_for(&self, text: &str) -> Option<ContinuationKey> {
        let caps = self.pattern.captures(text)?;
        let matched = caps.get(1).or_else(|| caps.get(0))?;
        ContinuationKey::new(matched.as_str().trim()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Option<ContinuationKey> {
        Some(ContinuationKey::new(s).unwrap())
    }

    #[test]
    fn course_code_matches_reference_entries() {
        let matcher = PatternMatcher::course_code();
        assert_eq!(matcher.key_for("CE 1A 101"), key("CE 1A 101"));
        assert_eq!(matcher.key_for("MATH 2B 210"), key("MATH 2B 210"));
        assert_eq!(matcher.key_for("Lab: CE 1A 101 (cont.)"), key("CE 1A 101"));
    }

    #[test]
    fn course_code_ignores_free_text() {
        let matcher = PatternMatcher::course_code();
        assert_eq!(matcher.key_for("Lunch"), None);
        assert_eq!(matcher.key_for("Staff meeting room 101"), None);
    }

    #[test]
    fn whole_match_used_without_capture_group() {
        let matcher = PatternMatcher::new(r"TICKET-\d+").unwrap();
        assert_eq!(matcher.key_for("fix TICKET-42 today"), key("TICKET-42"));
    }

    #[test]
    fn empty_capture_is_no_key() {
        let matcher = PatternMatcher::new(r"^(\s*)x").unwrap();
        assert_eq!(matcher.key_for("  x"), None);
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(PatternMatcher::new("(unclosed").is_err());
    }

    #[test]
    fn closures_are_matchers() {
        let matcher = |text: &str| ContinuationKey::new(text.to_uppercase()).ok();
        assert_eq!(matcher.key_for("abc"), key("ABC"));
        assert_eq!(matcher.key_for(""), None);
    }

    #[test]
    fn no_continuation_never_matches() {
        assert_eq!(NoContinuation.key_for("CE 1A 101"), None);
    }
}
