//! CLI command implementations.
//!
//! Each command is a `run` function taking its argument struct and
//! returning the process exit code. Commands load a profile document,
//! sniff which form it is, and work on the matching registry variant.

pub mod check;
pub mod completions;
pub mod fmt;
pub mod order;
pub mod show;

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::profile::{self, ProfileKind};
use crate::registry::{ExportStepRegistry, ImportStepRegistry};

/// A profile document loaded into the registry variant matching its form.
pub enum LoadedProfile {
    Import(ImportStepRegistry),
    Export(ExportStepRegistry),
}

/// Read a profile document from disk into the matching registry.
pub fn load_profile(path: &Path) -> Result<LoadedProfile> {
    let bytes = fs::read(path)?;
    let text = profile::decode_bytes(&bytes, None)?;

    match ProfileKind::detect(&text)? {
        ProfileKind::Import => {
            let mut registry = ImportStepRegistry::new();
            registry.parse_xml(&text)?;
            tracing::debug!(path = %path.display(), steps = registry.len(), "loaded import profile");
            Ok(LoadedProfile::Import(registry))
        }
        ProfileKind::Export => {
            let mut registry = ExportStepRegistry::new();
            registry.parse_xml(&text)?;
            tracing::debug!(path = %path.display(), steps = registry.len(), "loaded export profile");
            Ok(LoadedProfile::Export(registry))
        }
    }
}
