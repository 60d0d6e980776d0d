//! Day timeline CLI library.
//!
//! This crate provides the CLI interface for the timeline layout engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, LayoutArgs};
pub use config::Config;
