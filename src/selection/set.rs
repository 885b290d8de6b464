// src/selection/set.rs
// =============================================================================
// The set of file paths marked for export, and the checkbox semantics over
// the tree.
//
// Only file paths are ever stored. A directory's checked state is derived:
// it is checked when every file below it, at every depth, is selected.
// There is no partial state; anything less than "all" reads as unchecked.
//
// Every mutation takes paths from the current Tree, so the set never holds
// a path that is not a file in that tree.
//
// Rust concepts:
// - BTreeSet: a sorted set, so iteration is always in path order
// - &mut self: methods that change the selection borrow it mutably
// - Recursion: is_checked asks each child the same question
// =============================================================================

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::SelectionError;
use crate::github::EntryKind;
use crate::tree::{Node, Tree};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    paths: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Adds or removes exactly one file path.
    pub fn toggle_file(
        &mut self,
        tree: &Tree,
        path: &str,
        selected: bool,
    ) -> Result<(), SelectionError> {
        let node = tree
            .find(path)
            .ok_or_else(|| SelectionError::UnknownPath(path.to_string()))?;
        if !node.is_file() {
            return Err(SelectionError::NotAFile(path.to_string()));
        }

        // Store the tree's own copy of the path, not the caller's spelling
        if selected {
            self.paths.insert(node.path.clone());
        } else {
            self.paths.remove(&node.path);
        }
        Ok(())
    }

    /// Adds or removes every file in the node's subtree, at all depths.
    /// Returns how many paths actually changed state.
    pub fn toggle_directory(&mut self, node: &Node, selected: bool) -> usize {
        let mut changed = 0;
        for file in node.files() {
            // insert/remove report whether the set actually changed
            let did_change = if selected {
                self.paths.insert(file.path.clone())
            } else {
                self.paths.remove(&file.path)
            };
            if did_change {
                changed += 1;
            }
        }
        changed
    }

    /// Files: membership. Directories: every immediate child is itself checked.
    pub fn is_checked(&self, node: &Node) -> bool {
        match node.kind {
            EntryKind::File => self.contains(&node.path),
            EntryKind::Directory => node.children.iter().all(|child| self.is_checked(child)),
        }
    }

    pub fn check_all(&mut self, tree: &Tree) {
        self.paths = tree.root().file_paths().map(str::to_string).collect();
    }

    pub fn uncheck_all(&mut self) {
        self.paths.clear();
    }

    pub(crate) fn insert(&mut self, path: &str) -> bool {
        self.paths.insert(path.to_string())
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&String) -> bool) {
        self.paths.retain(keep);
    }
}
