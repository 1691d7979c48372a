//! Registry of unversioned, dependency-free steps.

use std::collections::HashMap;

use crate::error::{CairnError, Result};
use crate::profile::{self, ProfileKind};

use super::record::ExportStepMetadata;

/// A registry of named steps without versions or dependencies.
///
/// Because there is no version to compare, re-registering an existing id
/// is always a conflict; records are never silently replaced.
#[derive(Debug, Clone, Default)]
pub struct ExportStepRegistry {
    steps: HashMap<String, ExportStepMetadata>,
}

impl ExportStepRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step.
    ///
    /// `title` defaults to the id and `description` to the empty string,
    /// as in [`ImportStepRegistry::register_step`](super::ImportStepRegistry::register_step).
    ///
    /// # Errors
    ///
    /// - [`CairnError::InvalidStep`] if `id` is empty.
    /// - [`CairnError::DuplicateStep`] if `id` is already registered,
    ///   regardless of handler or title. The registry is left unchanged.
    pub fn register_step(
        &mut self,
        id: &str,
        handler: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        if id.is_empty() {
            return Err(CairnError::InvalidStep {
                message: "step id may not be empty".into(),
            });
        }
        if self.steps.contains_key(id) {
            return Err(CairnError::DuplicateStep { id: id.to_string() });
        }

        let record = ExportStepMetadata {
            id: id.to_string(),
            handler: handler.to_string(),
            title: title.unwrap_or(id).to_string(),
            description: description.unwrap_or("").to_string(),
        };
        self.steps.insert(id.to_string(), record);
        Ok(())
    }

    /// Get the handler token registered for `id`, if any.
    pub fn get_step(&self, id: &str) -> Option<&str> {
        self.steps.get(id).map(|s| s.handler.as_str())
    }

    /// Get the full record for `id`, if any.
    pub fn get_step_metadata(&self, id: &str) -> Option<&ExportStepMetadata> {
        self.steps.get(id)
    }

    /// All registered step ids, sorted.
    pub fn list_steps(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.steps.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All step records, sorted by id.
    pub fn list_step_metadata(&self) -> Vec<ExportStepMetadata> {
        self.list_steps()
            .iter()
            .filter_map(|id| self.steps.get(id).cloned())
            .collect()
    }

    /// Serialize the registry as an `<export-steps>` profile document,
    /// steps sorted by id.
    pub fn generate_xml(&self) -> String {
        profile::writer::write_export(&self.list_step_metadata())
    }

    /// Replace the registry contents with the steps of a profile document.
    ///
    /// The document is loaded completely before the registry is touched:
    /// on any parse or registration error the previous contents are kept.
    pub fn parse_xml(&mut self, text: &str) -> Result<()> {
        let parsed = profile::reader::read_profile(text, ProfileKind::Export)?;

        let mut staged = Self::new();
        for step in &parsed {
            staged.register_step(
                &step.id,
                &step.handler,
                step.title.as_deref(),
                Some(&step.description),
            )?;
        }

        tracing::debug!(steps = staged.len(), "loaded export step profile");
        self.steps = staged.steps;
        Ok(())
    }

    /// [`parse_xml`](Self::parse_xml) for byte input.
    ///
    /// `encoding`, when given, is an encoding label (e.g. `"latin1"`)
    /// used to decode the bytes; otherwise UTF-8 is assumed.
    pub fn parse_xml_bytes(&mut self, bytes: &[u8], encoding: Option<&str>) -> Result<()> {
        let text = profile::decode_bytes(bytes, encoding)?;
        self.parse_xml(&text)
    }
}
