//! CLI subcommand implementations.

pub mod config;
pub mod layout;
pub mod now;
pub mod util;
