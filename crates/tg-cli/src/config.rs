//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tg_core::{
    ContinuationMatcher, DisplayWindow, LayoutConfig, MergePolicy, NoContinuation, NowMarker,
    OverlapStage, PatternMatcher, StylePalette, now::DEFAULT_REFRESH_INTERVAL_MS,
};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Hour range mapped onto the timeline.
    pub window: DisplayWindow,

    /// Regex extracting continuation keys. Absent uses the built-in course
    /// code pattern; an empty string disables merging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_pattern: Option<String>,

    /// Which same-key events are merged.
    pub merge_policy: MergePolicy,

    /// When overlap is computed.
    pub overlap_stage: OverlapStage,

    /// Style names handed out to continuation keys.
    pub palette: Vec<String>,

    /// How often a live view should refresh the current-time marker.
    pub refresh_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: DisplayWindow::default(),
            continuation_pattern: None,
            merge_policy: MergePolicy::default(),
            overlap_stage: OverlapStage::default(),
            palette: ["blue", "green", "orange", "purple", "teal", "red"]
                .into_iter()
                .map(String::from)
                .collect(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TG_*), nested keys split on "__"
        figment = figment.merge(Env::prefixed("TG_").split("__"));

        figment.extract()
    }

    /// Engine parameters for a layout run.
    pub const fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            window: self.window,
            merge_policy: self.merge_policy,
            overlap_stage: self.overlap_stage,
        }
    }

    /// Builds the continuation matcher described by `continuation_pattern`.
    pub fn matcher(&self) -> anyhow::Result<Box<dyn ContinuationMatcher>> {
        match self.continuation_pattern.as_deref() {
            None => Ok(Box::new(PatternMatcher::course_code())),
            Some(pattern) if pattern.trim().is_empty() => Ok(Box::new(NoContinuation)),
            Some(pattern) => {
                let matcher = PatternMatcher::new(pattern)
                    .with_context(|| format!("invalid continuation_pattern {pattern:?}"))?;
                Ok(Box::new(matcher))
            }
        }
    }

    /// The configured style palette.
    pub fn style_palette(&self) -> StylePalette<String> {
        self.palette.iter().cloned().collect()
    }

    /// Current-time marker for the configured window.
    pub const fn now_marker(&self) -> NowMarker {
        NowMarker::new(self.window, self.refresh_interval_ms)
    }
}

/// Returns the platform-specific config directory for tg.
///
/// On Linux: `~/.config/tg`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tg"))
}
