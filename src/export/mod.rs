// src/export/mod.rs
// =============================================================================
// Turns a selection into one concatenated text artifact.
//
// Submodules:
// - aggregate: fetches and decodes the selected files, tolerating failures
// - artifact: the section format, the Artifact type and its filename
// =============================================================================

mod aggregate;
mod artifact;

pub use aggregate::{export_selection, fetch_text, Progress};
pub use artifact::Artifact;
