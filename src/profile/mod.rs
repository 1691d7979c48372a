//! XML step-profile documents.
//!
//! A profile is the textual serialization of a registry. Two isomorphic
//! forms exist, differing only in tag names and field surface:
//!
//! ```xml
//! <?xml version="1.0"?>
//! <import-steps>
//!  <import-step id="one" version="1" handler="app.steps.one" title="One Step">
//!   <dependency step="two" />
//!   One small step
//!  </import-step>
//! </import-steps>
//! ```
//!
//! The export form uses `<export-steps>`/`<export-step>` and never
//! carries a `version` attribute or `<dependency>` children.
//!
//! [`reader`] parses documents, [`writer`] renders them in a fixed layout
//! so serialized registries diff cleanly.

pub mod reader;
pub mod writer;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{CairnError, Result};

/// Which of the two document forms a profile uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// `<import-steps>` documents: versioned steps with dependencies.
    Import,
    /// `<export-steps>` documents: no versions, no dependencies.
    Export,
}

impl ProfileKind {
    /// Root element name for this form.
    pub fn root(self) -> &'static str {
        match self {
            ProfileKind::Import => "import-steps",
            ProfileKind::Export => "export-steps",
        }
    }

    /// Step element name for this form.
    pub fn step_element(self) -> &'static str {
        match self {
            ProfileKind::Import => "import-step",
            ProfileKind::Export => "export-step",
        }
    }

    /// Whether step elements carry a `version` attribute and may contain
    /// `<dependency>` children.
    pub fn has_dependencies(self) -> bool {
        matches!(self, ProfileKind::Import)
    }

    /// Determine a document's form from its root element.
    pub fn detect(text: &str) -> Result<ProfileKind> {
        reader::detect_kind(text)
    }
}

/// One step as it appears in a profile document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStep {
    /// Step id (`id` attribute).
    pub id: String,
    /// Version tag (`version` attribute); always present in the import
    /// form, never in the export form.
    pub version: Option<String>,
    /// Handler token (`handler` attribute).
    pub handler: String,
    /// Title (`title` attribute), when given.
    pub title: Option<String>,
    /// Dependency targets, in document order (import form only).
    pub dependencies: Vec<String>,
    /// Element body text, trimmed of leading and trailing whitespace.
    pub description: String,
}

/// Decode profile bytes into text.
///
/// `encoding` is an encoding label as understood by the WHATWG encoding
/// standard (e.g. `"latin1"`, `"utf-8"`). Without a label the bytes are
/// decoded as UTF-8 (with BOM sniffing).
pub(crate) fn decode_bytes(bytes: &[u8], encoding: Option<&str>) -> Result<String> {
    let encoding = match encoding {
        Some(label) => {
            Encoding::for_label(label.as_bytes()).ok_or_else(|| CairnError::ProfileParse {
                message: format!("unknown encoding label '{label}'"),
            })?
        }
        None => UTF_8,
    };

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(CairnError::ProfileParse {
            message: format!("input is not valid {}", encoding.name()),
        });
    }
    Ok(text.into_owned())
}

/// Build a `ProfileParse` error from any displayable cause.
pub(crate) fn parse_err(cause: impl std::fmt::Display) -> CairnError {
    CairnError::ProfileParse {
        message: cause.to_string(),
    }
}
