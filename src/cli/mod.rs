//! CLI module for momentum command-line interface
pub mod commands;
pub mod display;

pub use commands::{Cli, Commands, DeepWorkArgs, ProgressArgs, SchedulesArgs, WatchArgs};
pub use display::{Display, ProgressView};
