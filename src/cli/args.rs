//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Cairn - dependency-ordered step registries with XML step profiles.
#[derive(Debug, Parser)]
#[command(name = "cairn")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print steps in dependency order
    Order(OrderArgs),

    /// Check a profile for unregistered dependencies and cycles
    Check(CheckArgs),

    /// Show step metadata from a profile
    Show(ShowArgs),

    /// Rewrite a profile in canonical form
    Fmt(FmtArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `order` command.
#[derive(Debug, Clone, clap::Args)]
pub struct OrderArgs {
    /// Path to the step profile document
    pub profile: PathBuf,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Path to the step profile document
    pub profile: PathBuf,
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Path to the step profile document
    pub profile: PathBuf,

    /// Output format (human, json)
    #[arg(long, default_value = "human")]
    pub format: String,
}

/// Arguments for the `fmt` command.
#[derive(Debug, Clone, clap::Args)]
pub struct FmtArgs {
    /// Path to the step profile document
    pub profile: PathBuf,

    /// Rewrite the file in place instead of printing to stdout
    #[arg(long)]
    pub write: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
