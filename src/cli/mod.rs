//! Command-line interface for Cairn.
//!
//! This module provides the CLI argument parsing using clap's derive
//! macros and the per-command implementations.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};
