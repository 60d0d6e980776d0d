//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tg_core::{ClockTime, MergePolicy, OverlapStage};

/// Day timeline layout.
///
/// Turns a day's time slots into positioned, overlap-annotated blocks for a
/// single-day timeline view.
#[derive(Debug, Parser)]
#[command(name = "tg", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Lay out a day schedule.
    Layout(LayoutArgs),

    /// Show where the current-time marker sits in the display window.
    Now {
        /// Time to place instead of the local wall clock (HH:MM).
        #[arg(long)]
        at: Option<ClockTime>,
    },

    /// Print the effective configuration.
    Config,
}

/// Options for `tg layout`.
#[derive(Debug, Default, Args)]
pub struct LayoutArgs {
    /// Schedule file: a JSON array of `{start, end, value}` slots. Reads stdin if omitted.
    pub file: Option<PathBuf>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Fail if any slot had to be skipped.
    #[arg(long)]
    pub strict: bool,

    /// First hour of the display window.
    #[arg(long)]
    pub start_hour: Option<f64>,

    /// Number of hours the display window covers.
    #[arg(long)]
    pub span_hours: Option<f64>,

    /// Which same-key events are merged (contiguous, key_only).
    #[arg(long)]
    pub merge_policy: Option<MergePolicy>,

    /// When overlap is computed (after_merge, before_merge).
    #[arg(long)]
    pub overlap_stage: Option<OverlapStage>,

    /// Disable continuation merging.
    #[arg(long)]
    pub no_merge: bool,
}
