//! Check command implementation.
//!
//! Reports declared dependencies whose target step is not registered,
//! and dependency cycles. Exit code 1 when anything is found.

use console::style;

use crate::cli::args::CheckArgs;
use crate::error::Result;

use super::{load_profile, LoadedProfile};

/// Run the `check` command.
pub fn run(args: &CheckArgs) -> Result<u8> {
    let registry = match load_profile(&args.profile)? {
        LoadedProfile::Import(registry) => registry,
        LoadedProfile::Export(registry) => {
            // No versions, no dependencies: nothing to check beyond the parse
            println!(
                "{} {} export steps, nothing to check",
                style("ok").green().bold(),
                registry.len()
            );
            return Ok(0);
        }
    };

    let mut problems = 0usize;

    for (step, dependency) in registry.missing_dependencies() {
        problems += 1;
        println!(
            "{} step '{step}' depends on unregistered step '{dependency}'",
            style("missing").red().bold()
        );
    }

    if let Some(cycle) = registry.dependency_graph().find_cycle() {
        problems += 1;
        println!(
            "{} {}",
            style("cycle").red().bold(),
            cycle.join(" -> ")
        );
    }

    if problems == 0 {
        println!(
            "{} {} steps, all dependencies registered, no cycles",
            style("ok").green().bold(),
            registry.len()
        );
        Ok(0)
    } else {
        Ok(1)
    }
}
