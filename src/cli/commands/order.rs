//! Order command implementation.
//!
//! Prints the steps of a profile in dependency order, one id per line.

use crate::cli::args::OrderArgs;
use crate::error::Result;

use super::{load_profile, LoadedProfile};

/// Run the `order` command.
pub fn run(args: &OrderArgs) -> Result<u8> {
    let ids = match load_profile(&args.profile)? {
        LoadedProfile::Import(registry) => registry.topological_order()?,
        // Export steps have no dependencies; id order is as good as any
        LoadedProfile::Export(registry) => registry.list_steps(),
    };

    for id in ids {
        println!("{id}");
    }
    Ok(0)
}
