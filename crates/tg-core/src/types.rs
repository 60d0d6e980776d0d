//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The display window does not describe a usable hour range.
    #[error("display window must have a finite start and positive span, got start {start_hour}, span {span_hours}")]
    InvalidWindow { start_hour: f64, span_hours: f64 },

    /// Invalid merge policy value.
    #[error("invalid merge policy: {value}")]
    InvalidMergePolicy { value: String },

    /// Invalid overlap stage value.
    #[error("invalid overlap stage: {value}")]
    InvalidOverlapStage { value: String },
}

/// How events sharing a continuation key are collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Merge only runs where each event starts exactly where the previous one ended.
    #[default]
    Contiguous,
    /// Merge every event sharing a key, regardless of gaps between them.
    KeyOnly,
}

impl MergePolicy {
    /// String representation used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contiguous => "contiguous",
            Self::KeyOnly => "key_only",
        }
    }
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MergePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contiguous" => Ok(Self::Contiguous),
            "key_only" | "key-only" => Ok(Self::KeyOnly),
            _ => Err(ValidationError::InvalidMergePolicy {
                value: s.to_string(),
            }),
        }
    }
}

/// Which event list the overlap scan runs against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapStage {
    /// Scan the merged list, so a continuation never overlaps its own pieces.
    #[default]
    AfterMerge,
    /// Scan the split list before merging; survivors keep the flag they had.
    BeforeMerge,
}

impl OverlapStage {
    /// String representation used in configuration.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AfterMerge => "after_merge",
            Self::BeforeMerge => "before_merge",
        }
    }
}

impl fmt::Display for OverlapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OverlapStage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "after_merge" | "after-merge" => Ok(Self::AfterMerge),
            "before_merge" | "before-merge" => Ok(Self::BeforeMerge),
            _ => Err(ValidationError::InvalidOverlapStage {
                value: s.to_string(),
            }),
        }
    }
}

/// Generates a validated string key newtype with common trait implementations.
macro_rules! define_string_key {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new key after validation.
            pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
                let key = key.into();
                if key.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(key))
            }

            /// Returns the key as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(key: $name) -> Self {
                key.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_key!(
    /// A validated continuation-group key.
    ///
    /// Keys are extracted from event text by a [`crate::ContinuationMatcher`].
    /// Events sharing a key are candidates for being collapsed into one block.
    ContinuationKey, "continuation key"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuation_key_rejects_empty() {
        assert!(ContinuationKey::new("").is_err());
        assert!(ContinuationKey::new("   ").is_err());
        assert!(ContinuationKey::new("CE 1A 101").is_ok());
    }

    #[test]
    fn continuation_key_serde_roundtrip() {
        let key = ContinuationKey::new("MATH 2B 210").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"MATH 2B 210\"");
        let parsed: ContinuationKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn continuation_key_serde_rejects_empty() {
        let result: Result<ContinuationKey, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn continuation_key_as_ref() {
        let key = ContinuationKey::new("CE 1A 101").unwrap();
        let s: &str = key.as_ref();
        assert_eq!(s, "CE 1A 101");
    }

    // ========== MergePolicy Tests ==========

    #[test]
    fn merge_policy_from_str() {
        assert_eq!(
            "contiguous".parse::<MergePolicy>().unwrap(),
            MergePolicy::Contiguous
        );
        assert_eq!(
            "key_only".parse::<MergePolicy>().unwrap(),
            MergePolicy::KeyOnly
        );
        assert_eq!(
            "key-only".parse::<MergePolicy>().unwrap(),
            MergePolicy::KeyOnly
        );
        assert!("always".parse::<MergePolicy>().is_err());
    }

    #[test]
    fn merge_policy_default_is_contiguous() {
        assert_eq!(MergePolicy::default(), MergePolicy::Contiguous);
    }

    #[test]
    fn merge_policy_serde_roundtrip() {
        let json = serde_json::to_string(&MergePolicy::KeyOnly).unwrap();
        assert_eq!(json, "\"key_only\"");
        let parsed: MergePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MergePolicy::KeyOnly);
    }

    // ========== OverlapStage Tests ==========

    #[test]
    fn overlap_stage_from_str() {
        assert_eq!(
            "after_merge".parse::<OverlapStage>().unwrap(),
            OverlapStage::AfterMerge
        );
        assert_eq!(
            "before-merge".parse::<OverlapStage>().unwrap(),
            OverlapStage::BeforeMerge
        );
        let err = "sometimes".parse::<OverlapStage>().unwrap_err();
        assert_eq!(err.to_string(), "invalid overlap stage: sometimes");
    }

    #[test]
    fn overlap_stage_display_matches_as_str() {
        assert_eq!(OverlapStage::AfterMerge.to_string(), "after_merge");
        assert_eq!(OverlapStage::BeforeMerge.to_string(), "before_merge");
    }
}
