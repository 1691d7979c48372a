//! Cairn - dependency-ordered step registries with XML step profiles.
//!
//! Cairn keeps track of named steps, the steps they depend on, and one
//! total order consistent with those dependencies. Registries serialize
//! to a stable, human-diffable XML document ("step profile") and load
//! back from it. Handlers are opaque dotted-name tokens; resolving them
//! to something callable is the host's business, never the registry's.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`graph`] - Dependency graph and topological ordering
//! - [`handlers`] - Host-side handler resolution table
//! - [`profile`] - XML step-profile reading and writing
//! - [`registry`] - Import and export step registries
//!
//! # Example
//!
//! ```
//! use cairn::registry::ImportStepRegistry;
//!
//! let mut registry = ImportStepRegistry::new();
//! registry
//!     .register_step("two", "1", "app.steps.two", &[], None, None)
//!     .unwrap();
//! registry
//!     .register_step("one", "1", "app.steps.one", &["two"], Some("One Step"), None)
//!     .unwrap();
//!
//! // "two" is depended upon, so it comes first
//! assert_eq!(registry.topological_order().unwrap(), vec!["two", "one"]);
//!
//! // The profile document round-trips the registration
//! let xml = registry.generate_xml().unwrap();
//! let mut reloaded = ImportStepRegistry::new();
//! reloaded.parse_xml(&xml).unwrap();
//! assert_eq!(reloaded.list_steps(), registry.list_steps());
//! ```

pub mod cli;
pub mod error;
pub mod graph;
pub mod handlers;
pub mod profile;
pub mod registry;

pub use error::{CairnError, Result};
