//! Step record views.
//!
//! A registry hands out its records as read-only metadata values. The
//! handler field is always a dotted-name token; resolving it to something
//! callable is the business of the host's
//! [`HandlerTable`](crate::handlers::HandlerTable), never the registry's.

use serde::Serialize;

/// Metadata for one step in an [`ImportStepRegistry`](super::ImportStepRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepMetadata {
    /// Unique step id within the registry.
    pub id: String,

    /// Arbitrary version tag. Re-registering an id under a different
    /// version replaces the whole record.
    pub version: String,

    /// Dotted-name handler token, resolvable by the host environment.
    pub handler: String,

    /// Ids of steps this step depends on, as declared. Targets need not
    /// be registered; duplicates are kept.
    pub dependencies: Vec<String>,

    /// Human-readable short label.
    pub title: String,

    /// Human-readable longer text.
    pub description: String,
}

/// Metadata for one step in an [`ExportStepRegistry`](super::ExportStepRegistry).
///
/// Export steps carry no version and no dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportStepMetadata {
    /// Unique step id within the registry.
    pub id: String,

    /// Dotted-name handler token, resolvable by the host environment.
    pub handler: String,

    /// Human-readable short label.
    pub title: String,

    /// Human-readable longer text.
    pub description: String,
}
