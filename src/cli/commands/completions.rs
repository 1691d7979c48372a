//! Completions command implementation.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;

/// Run the `completions` command.
pub fn run(args: &CompletionsArgs) -> Result<u8> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "cairn", &mut io::stdout());
    Ok(0)
}
