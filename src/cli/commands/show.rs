//! Show command implementation.
//!
//! Prints per-step metadata from a profile, as human-readable text or
//! as JSON.

use anyhow::Context;
use console::style;

use crate::cli::args::ShowArgs;
use crate::error::Result;
use crate::registry::{ExportStepMetadata, StepMetadata};

use super::{load_profile, LoadedProfile};

/// Run the `show` command.
pub fn run(args: &ShowArgs) -> Result<u8> {
    let profile = load_profile(&args.profile)?;

    match args.format.as_str() {
        "json" => {
            let json = match &profile {
                LoadedProfile::Import(registry) => {
                    serde_json::to_string_pretty(&registry.list_step_metadata()?)
                }
                LoadedProfile::Export(registry) => {
                    serde_json::to_string_pretty(&registry.list_step_metadata())
                }
            }
            .context("serializing step metadata")?;
            println!("{json}");
        }
        _ => match &profile {
            LoadedProfile::Import(registry) => {
                for step in registry.list_step_metadata()? {
                    print_import_step(&step);
                }
            }
            LoadedProfile::Export(registry) => {
                for step in registry.list_step_metadata() {
                    print_export_step(&step);
                }
            }
        },
    }

    Ok(0)
}

fn print_import_step(step: &StepMetadata) {
    println!(
        "{} (version {}) - {}",
        style(&step.id).bold(),
        step.version,
        step.title
    );
    println!("    handler: {}", step.handler);
    if !step.dependencies.is_empty() {
        println!("    depends on: {}", step.dependencies.join(", "));
    }
    if !step.description.is_empty() {
        println!("    {}", step.description);
    }
}

fn print_export_step(step: &ExportStepMetadata) {
    println!("{} - {}", style(&step.id).bold(), step.title);
    println!("    handler: {}", step.handler);
    if !step.description.is_empty() {
        println!("    {}", step.description);
    }
}
