//! Registry of versioned, dependency-bearing steps.

use std::collections::HashMap;

use crate::error::{CairnError, Result};
use crate::graph::DependencyGraph;
use crate::profile::{self, ProfileKind};

use super::record::StepMetadata;

/// A registry of named steps with declared dependencies.
///
/// Steps carry a version tag: re-registering an id under the *same*
/// version is a conflict, while a different version replaces the whole
/// record. Dependency targets are referenced by id only and need not be
/// registered; [`missing_dependencies`](Self::missing_dependencies)
/// reports the ones that are not.
#[derive(Debug, Clone, Default)]
pub struct ImportStepRegistry {
    steps: HashMap<String, StepMetadata>,
}

impl ImportStepRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step, or replace an existing registration.
    ///
    /// `title` defaults to the id and `description` to the empty string.
    /// Callers that want documentation-derived defaults can pass the
    /// result of [`summarize_doc`](crate::handlers::summarize_doc).
    ///
    /// # Errors
    ///
    /// - [`CairnError::InvalidStep`] if `id` is empty.
    /// - [`CairnError::DuplicateStep`] if `id` is already registered under
    ///   the same `version`. The registry is left unchanged.
    pub fn register_step(
        &mut self,
        id: &str,
        version: &str,
        handler: &str,
        dependencies: &[&str],
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<()> {
        if id.is_empty() {
            return Err(CairnError::InvalidStep {
                message: "step id may not be empty".into(),
            });
        }

        if let Some(existing) = self.steps.get(id) {
            if existing.version == version {
                return Err(CairnError::DuplicateStep { id: id.to_string() });
            }
            tracing::debug!(
                id,
                old_version = %existing.version,
                new_version = %version,
                "replacing step registration"
            );
        }

        let record = StepMetadata {
            id: id.to_string(),
            version: version.to_string(),
            handler: handler.to_string(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
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
    pub fn get_step_metadata(&self, id: &str) -> Option<&StepMetadata> {
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

    /// The dependency graph over the registered steps.
    ///
    /// Declared dependencies on unregistered ids are not part of the
    /// graph; they constrain nothing.
    pub fn dependency_graph(&self) -> DependencyGraph {
        let mut builder = DependencyGraph::builder();
        for step in self.steps.values() {
            builder = builder.add_step(step.id.clone(), step.dependencies.iter().cloned());
        }
        builder.build()
    }

    /// Registered step ids in dependency order: every step appears after
    /// all of its registered dependencies.
    ///
    /// # Errors
    ///
    /// [`CairnError::CircularDependency`] if the registered steps form a
    /// cycle (a step depending on itself counts as a one-step cycle).
    pub fn topological_order(&self) -> Result<Vec<String>> {
        self.dependency_graph().topological_order()
    }

    /// All step records, in [`topological_order`](Self::topological_order) order.
    pub fn list_step_metadata(&self) -> Result<Vec<StepMetadata>> {
        let order = self.topological_order()?;
        Ok(order
            .iter()
            .filter_map(|id| self.steps.get(id).cloned())
            .collect())
    }

    /// Declared dependency edges whose target is not registered, as
    /// `(step, dependency)` pairs sorted by step id.
    ///
    /// A step declaring the same missing dependency twice yields two pairs.
    pub fn missing_dependencies(&self) -> Vec<(String, String)> {
        let mut ids: Vec<&StepMetadata> = self.steps.values().collect();
        ids.sort_by(|a, b| a.id.cmp(&b.id));

        let mut missing = Vec::new();
        for step in ids {
            for dep in &step.dependencies {
                if !self.steps.contains_key(dep) {
                    missing.push((step.id.clone(), dep.clone()));
                }
            }
        }
        missing
    }

    /// Serialize the registry as an `<import-steps>` profile document,
    /// steps in dependency order.
    pub fn generate_xml(&self) -> Result<String> {
        Ok(profile::writer::write_import(&self.list_step_metadata()?))
    }

    /// Replace the registry contents with the steps of a profile document.
    ///
    /// The document is loaded completely before the registry is touched:
    /// on any parse or registration error the previous contents are kept.
    pub fn parse_xml(&mut self, text: &str) -> Result<()> {
        let parsed = profile::reader::read_profile(text, ProfileKind::Import)?;

        let mut staged = Self::new();
        for step in &parsed {
            let deps: Vec<&str> = step.dependencies.iter().map(String::as_str).collect();
            staged.register_step(
                &step.id,
                step.version.as_deref().unwrap_or(""),
                &step.handler,
                &deps,
                step.title.as_deref(),
                Some(&step.description),
            )?;
        }

        tracing::debug!(steps = staged.len(), "loaded import step profile");
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
