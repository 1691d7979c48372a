//! Fmt command implementation.
//!
//! Re-serializes a profile in the canonical layout, to stdout or back
//! to the file.

use std::fs;

use crate::cli::args::FmtArgs;
use crate::error::Result;

use super::{load_profile, LoadedProfile};

/// Run the `fmt` command.
pub fn run(args: &FmtArgs) -> Result<u8> {
    let xml = match load_profile(&args.profile)? {
        LoadedProfile::Import(registry) => registry.generate_xml()?,
        LoadedProfile::Export(registry) => registry.generate_xml(),
    };

    if args.write {
        fs::write(&args.profile, &xml)?;
        tracing::info!(path = %args.profile.display(), "rewrote profile");
    } else {
        print!("{xml}");
    }
    Ok(0)
}
