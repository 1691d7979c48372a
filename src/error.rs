//! Error types for Cairn operations.
//!
//! This module defines [`CairnError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `CairnError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `CairnError::Other`) for unexpected errors
//! - Missing-id lookups are not errors: `get_step`/`get_step_metadata`
//!   return `Option` and let the caller supply a default

use thiserror::Error;

/// Core error type for Cairn operations.
#[derive(Debug, Error)]
pub enum CairnError {
    /// Registration conflict: the id is already taken and may not be replaced.
    #[error("Step '{id}' is already registered")]
    DuplicateStep { id: String },

    /// Invalid registration arguments.
    #[error("Invalid step: {message}")]
    InvalidStep { message: String },

    /// Step dependency cycle detected.
    #[error("Circular dependency detected: {cycle}")]
    CircularDependency { cycle: String },

    /// Malformed or schema-violating step profile document.
    #[error("Failed to parse step profile: {message}")]
    ProfileParse { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Cairn operations.
pub type Result<T> = std::result::Result<T, CairnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_step_displays_id() {
        let err = CairnError::DuplicateStep { id: "one".into() };
        assert!(err.to_string().contains("one"));
    }

    #[test]
    fn invalid_step_displays_message() {
        let err = CairnError::InvalidStep {
            message: "step id may not be empty".into(),
        };
        assert!(err.to_string().contains("step id may not be empty"));
    }

    #[test]
    fn circular_dependency_displays_cycle() {
        let err = CairnError::CircularDependency {
            cycle: "a -> b -> a".into(),
        };
        assert!(err.to_string().contains("a -> b -> a"));
    }

    #[test]
    fn profile_parse_displays_message() {
        let err = CairnError::ProfileParse {
            message: "missing required attribute 'handler'".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("step profile"));
        assert!(msg.contains("handler"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: CairnError = io_err.into();
        assert!(matches!(err, CairnError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(CairnError::InvalidStep {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
