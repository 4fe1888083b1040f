//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the filestore binary.

mod commands;
mod files;

pub use commands::{Cli, Commands};
pub use files::{describe_definition, load_file, purge_file, save_file};
