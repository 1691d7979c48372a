//! Step registries.
//!
//! Two registry variants share one record shape:
//!
//! - [`ImportStepRegistry`] - versioned steps with declared dependencies,
//!   dependency-order listing, and missing-dependency reporting
//! - [`ExportStepRegistry`] - unversioned, dependency-free steps where any
//!   id collision is a conflict
//!
//! Both serialize to and load from the XML step-profile documents
//! described in [`crate::profile`]. Handlers are stored as dotted-name
//! tokens only; see [`crate::handlers`] for the host-side resolution table.
//!
//! # Example
//!
//! ```
//! use cairn::registry::ImportStepRegistry;
//!
//! let mut registry = ImportStepRegistry::new();
//! registry.register_step("two", "1", "app.steps.two", &[], None, None).unwrap();
//! registry.register_step("one", "1", "app.steps.one", &["two"], None, None).unwrap();
//!
//! assert_eq!(registry.topological_order().unwrap(), vec!["two", "one"]);
//! ```

pub mod export;
pub mod import;
pub mod record;

pub use export::ExportStepRegistry;
pub use import::ImportStepRegistry;
pub use record::{ExportStepMetadata, StepMetadata};
