//! Canonical profile rendering.
//!
//! Output layout is fixed (one line per step element opening, two-space
//! body indent, trailing newline) so that serializing the same registry
//! twice, or on two machines, produces byte-identical documents.

use std::fmt::Write;

use quick_xml::escape::escape;

use crate::registry::{ExportStepMetadata, StepMetadata};

/// Render an `<import-steps>` document.
///
/// Steps are written in the order given; registries pass their
/// dependency order.
pub fn write_import(steps: &[StepMetadata]) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?>\n<import-steps>\n");
    for step in steps {
        let _ = writeln!(
            out,
            " <import-step id=\"{}\" version=\"{}\" handler=\"{}\" title=\"{}\">",
            escape(step.id.as_str()),
            escape(step.version.as_str()),
            escape(step.handler.as_str()),
            escape(step.title.as_str()),
        );
        for dep in &step.dependencies {
            let _ = writeln!(out, "  <dependency step=\"{}\" />", escape(dep.as_str()));
        }
        if !step.description.is_empty() {
            let _ = writeln!(out, "  {}", escape(step.description.as_str()));
        }
        out.push_str(" </import-step>\n");
    }
    out.push_str("</import-steps>\n");
    out
}

/// Render an `<export-steps>` document.
pub fn write_export(steps: &[ExportStepMetadata]) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?>\n<export-steps>\n");
    for step in steps {
        let _ = writeln!(
            out,
            " <export-step id=\"{}\" handler=\"{}\" title=\"{}\">",
            escape(step.id.as_str()),
            escape(step.handler.as_str()),
            escape(step.title.as_str()),
        );
        if !step.description.is_empty() {
            let _ = writeln!(out, "  {}", escape(step.description.as_str()));
        }
        out.push_str(" </export-step>\n");
    }
    out.push_str("</export-steps>\n");
    out
}
