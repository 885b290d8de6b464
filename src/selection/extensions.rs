// src/selection/extensions.rs
// =============================================================================
// File extensions present in a tree, and bulk selection by extension.
//
// Extensions are normalized to a lower-case, dot-prefixed form (".rs").
// Files without a dot in their name contribute nothing.
//
// Toggling an extension is deliberately asymmetric:
// - disabling removes the selected files whose path ends with it
// - enabling adds EVERY file in the tree whose path ends with it, whatever
//   was selected before
// So disable-then-enable does not restore an earlier selection; it selects
// the whole population of that extension.
//
// Rust concepts:
// - Option and ?: extension_of returns None early for names without one
// - BTreeMap / BTreeSet: sorted collections, so output order is stable
// - retain: removes entries in place based on a predicate
// =============================================================================

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use super::set::SelectionSet;
use crate::tree::Tree;

/// The normalized extension of a file name, if it has one.
///
/// A name ending in "." ("notes.") has a dot but no extension, so it is
/// left out of the counts.
pub fn extension_of(name: &str) -> Option<String> {
    // Split at the last dot: "archive.tar.gz" -> ("archive.tar", "gz")
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_lowercase()))
}

/// Normalizes user input: "RS", "rs" and ".rs" all become ".rs"
pub fn normalize_extension(input: &str) -> Option<String> {
    let trimmed = input.trim().trim_start_matches('.');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!(".{}", trimmed.to_lowercase()))
}

pub fn extract_extensions(tree: &Tree) -> BTreeSet<String> {
    tree.files()
        .filter_map(|file| extension_of(&file.name))
        .collect()
}

pub fn count_by_extension(tree: &Tree) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for ext in tree.files().filter_map(|file| extension_of(&file.name)) {
        // entry() inserts 0 the first time an extension is seen
        *counts.entry(ext).or_insert(0) += 1;
    }
    counts
}

/// Applies one extension toggle to the selection. Returns how many paths changed.
pub fn toggle_extension(
    selection: &mut SelectionSet,
    tree: &Tree,
    ext: &str,
    currently_enabled: bool,
) -> usize {
    let before = selection.len();

    if currently_enabled {
        // Only what is already selected can be dropped
        selection.retain(|path| !path.ends_with(ext));
        before - selection.len()
    } else {
        let mut added = 0;
        for file in tree.files().filter(|file| file.path.ends_with(ext)) {
            if selection.insert(&file.path) {
                added += 1;
            }
        }
        added
    }
}

/// One row of the extension registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionInfo {
    pub extension: String,
    pub count: usize,
    pub enabled: bool,
}

/// Which extensions are currently enabled for filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    enabled: BTreeSet<String>,
}

impl ExtensionFilter {
    pub fn new(enabled: impl IntoIterator<Item = String>) -> Self {
        Self {
            enabled: enabled
                .into_iter()
                .filter_map(|ext| normalize_extension(&ext))
                .collect(),
        }
    }

    pub fn is_enabled(&self, ext: &str) -> bool {
        self.enabled.contains(ext)
    }

    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }

    /// Flips the extension and applies the matching selection change.
    /// Returns whether the extension is enabled afterwards.
    pub fn toggle(&mut self, ext: &str, selection: &mut SelectionSet, tree: &Tree) -> bool {
        let was_enabled = self.is_enabled(ext);
        let changed = toggle_extension(selection, tree, ext, was_enabled);

        if was_enabled {
            self.enabled.remove(ext);
        } else {
            self.enabled.insert(ext.to_string());
        }

        debug!(extension = ext, enabled = !was_enabled, changed, "toggled extension");
        !was_enabled
    }

    /// Counts per extension present in the tree, with their enabled flag
    pub fn registry(&self, tree: &Tree) -> Vec<ExtensionInfo> {
        count_by_extension(tree)
            .into_iter()
            .map(|(extension, count)| ExtensionInfo {
                enabled: self.is_enabled(&extension),
                extension,
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;

    fn python_tree() -> Tree {
        Tree::new(vec![
            Node::file("a.py", "a.py"),
            Node::file("b.py", "b.py"),
            Node::file("notes.txt", "notes.txt"),
            Node::directory(
                "pkg",
                "pkg",
                vec![
                    Node::file("c.py", "pkg/c.py"),
                    Node::file("Makefile", "pkg/Makefile"),
                    Node::file("Data.JSON", "pkg/Data.JSON"),
                    Node::file(".gitignore", "pkg/.gitignore"),
                ],
            ),
        ])
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("main.RS"), Some(".rs".to_string()));
        assert_eq!(extension_of("archive.tar.gz"), Some(".gz".to_string()));
        assert_eq!(extension_of(".gitignore"), Some(".gitignore".to_string()));
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension("PY"), Some(".py".to_string()));
        assert_eq!(normalize_extension(".ts"), Some(".ts".to_string()));
        assert_eq!(normalize_extension(" . "), None);
    }

    #[test]
    fn test_extract_and_count() {
        let tree = python_tree();
        let exts: Vec<_> = extract_extensions(&tree).into_iter().collect();
        assert_eq!(exts, vec![".gitignore", ".json", ".py", ".txt"]);

        let counts = count_by_extension(&tree);
        assert_eq!(counts[".py"], 3);
        assert_eq!(counts[".json"], 1);

        let dotted = tree.files().filter(|f| f.name.contains('.')).count();
        assert_eq!(counts.values().sum::<usize>(), dotted);
    }

    #[test]
    fn test_trailing_dot_counts_toward_no_extension() {
        let tree = Tree::new(vec![
            Node::file("notes.", "notes."),
            Node::file("notes.txt", "notes.txt"),
            Node::file("README", "README"),
        ]);

        assert_eq!(extension_of("notes."), None);
        let counts = count_by_extension(&tree);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[".txt"], 1);

        // "notes." has a dot but contributes no extension
        let dotted = tree.files().filter(|f| f.name.contains('.')).count();
        assert_eq!(dotted, 2);
        assert_eq!(counts.values().sum::<usize>(), 1);
    }

    #[test]
    fn test_disable_then_enable_is_asymmetric() {
        let tree = python_tree();
        let mut selection = SelectionSet::new();
        selection.toggle_file(&tree, "a.py", true).unwrap();
        selection.toggle_file(&tree, "notes.txt", true).unwrap();

        // Disabling removes only selected .py files
        assert_eq!(toggle_extension(&mut selection, &tree, ".py", true), 1);
        let paths: Vec<_> = selection.iter().collect();
        assert_eq!(paths, vec!["notes.txt"]);

        // Enabling adds every .py file, including ones never selected
        assert_eq!(toggle_extension(&mut selection, &tree, ".py", false), 3);
        let paths: Vec<_> = selection.iter().collect();
        assert_eq!(paths, vec!["a.py", "b.py", "notes.txt", "pkg/c.py"]);
    }

    #[test]
    fn test_suffix_match_is_case_sensitive() {
        let tree = python_tree();
        let mut selection = SelectionSet::new();
        assert_eq!(toggle_extension(&mut selection, &tree, ".json", false), 0);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_filter_toggle_flips_state() {
        let tree = python_tree();
        let mut selection = SelectionSet::new();
        let mut filter = ExtensionFilter::new(vec!["py".to_string()]);
        assert!(filter.is_enabled(".py"));

        selection.check_all(&tree);
        assert!(!filter.toggle(".py", &mut selection, &tree));
        assert!(!selection.contains("b.py"));
        assert!(selection.contains("notes.txt"));

        assert!(filter.toggle(".py", &mut selection, &tree));
        assert!(selection.contains("b.py"));
        assert_eq!(filter.enabled().collect::<Vec<_>>(), vec![".py"]);
    }

    #[test]
    fn test_registry_marks_enabled() {
        let tree = python_tree();
        let filter = ExtensionFilter::new(vec![".txt".to_string(), ".css".to_string()]);
        let registry = filter.registry(&tree);

        let txt = registry.iter().find(|r| r.extension == ".txt").unwrap();
        assert!(txt.enabled);
        assert_eq!(txt.count, 1);
        assert!(registry.iter().all(|r| r.extension != ".css"));
        assert!(!registry.iter().find(|r| r.extension == ".py").unwrap().enabled);
    }
}
