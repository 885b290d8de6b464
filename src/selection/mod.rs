// src/selection/mod.rs
// =============================================================================
// Selection state over an acquired tree.
//
// Submodules:
// - set: the SelectionSet and per-file / per-directory checkbox semantics
// - extensions: extension registry and bulk select/deselect by extension
// =============================================================================

mod extensions;
mod set;

pub use extensions::{extract_extensions, normalize_extension, ExtensionFilter, ExtensionInfo};
pub use set::SelectionSet;
