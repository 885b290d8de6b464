// src/tree/node.rs
// =============================================================================
// In-memory snapshot of a repository's directory structure.
//
// A Tree is built once per acquisition and never patched afterwards; a new
// acquisition replaces it wholesale. Children are plain owned vectors in
// provider order, which is all a read-only snapshot needs.
//
// Rust concepts:
// - Owned recursion: a Node owns its children (Vec<Node>), no Rc or pointers
// - Custom iterators: Files walks the tree with an explicit stack
// - Lifetimes: Files<'a> borrows the tree, so it cannot outlive it
// =============================================================================

use serde::Serialize;

use crate::github::EntryKind;

/// One file or directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub name: String,
    /// Root-relative, slash-delimited, unique across the tree
    pub path: String,
    pub kind: EntryKind,
    /// Git object id, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::File,
            sha: None,
            children: Vec::new(),
        }
    }

    pub fn directory(name: impl Into<String>, path: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::Directory,
            sha: None,
            children,
        }
    }

    pub fn with_sha(mut self, sha: Option<String>) -> Self {
        self.sha = sha;
        self
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Every file in this node's subtree, depth-first, left to right.
    /// A file node yields itself.
    pub fn files(&self) -> Files<'_> {
        Files { stack: vec![self] }
    }

    pub fn file_paths(&self) -> impl Iterator<Item = &str> {
        self.files().map(|node| node.path.as_str())
    }

    /// Looks up a node by path within this subtree
    pub fn find(&self, path: &str) -> Option<&Node> {
        if self.path == path {
            return Some(self);
        }
        // Only descend into the child whose path is a prefix of the target
        self.children
            .iter()
            .find(|child| {
                child.path == path
                    || (path.starts_with(child.path.as_str())
                        && path.as_bytes().get(child.path.len()) == Some(&b'/'))
            })
            .and_then(|child| child.find(path))
    }
}

/// Depth-first iterator over the file nodes of a subtree
pub struct Files<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Files<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_file() {
                return Some(node);
            }
            // Reversed so the leftmost child is popped first
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}

/// The full acquired snapshot, rooted at a synthetic "/" directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tree {
    root: Node,
}

impl Tree {
    pub const ROOT_NAME: &'static str = "/";

    pub fn new(children: Vec<Node>) -> Self {
        Self {
            root: Node::directory(Self::ROOT_NAME, "", children),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// "" (or "/") addresses the root
    pub fn find(&self, path: &str) -> Option<&Node> {
        let path = path.trim_matches('/');
        self.root.find(path)
    }

    pub fn files(&self) -> Files<'_> {
        self.root.files()
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }

    /// Directories below the synthetic root
    pub fn directory_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            node.children
                .iter()
                .filter(|child| child.is_dir())
                .map(|child| 1 + count(child))
                .sum()
        }
        count(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::fixtures::sample_tree;

    #[test]
    fn test_files_are_depth_first_left_to_right() {
        let tree = sample_tree();
        let paths: Vec<_> = tree.root().file_paths().collect();
        assert_eq!(
            paths,
            vec!["README.md", "src/main.rs", "src/util/fmt.rs", "srcgen/out.rs"]
        );
    }

    #[test]
    fn test_file_node_yields_itself() {
        let file = Node::file("a.txt", "a.txt");
        let paths: Vec<_> = file.file_paths().collect();
        assert_eq!(paths, vec!["a.txt"]);
    }

    #[test]
    fn test_find_respects_segment_boundaries() {
        let tree = sample_tree();
        assert_eq!(tree.find("srcgen/out.rs").unwrap().name, "out.rs");
        assert_eq!(tree.find("src/util").unwrap().kind, EntryKind::Directory);
        assert!(tree.find("src/missing.rs").is_none());
        assert!(tree.find("").unwrap().is_dir());
        assert_eq!(tree.find("/").unwrap().name, "/");
    }

    #[test]
    fn test_counts() {
        let tree = sample_tree();
        assert_eq!(tree.file_count(), 4);
        assert_eq!(tree.directory_count(), 3);
    }

    #[test]
    fn test_serializes_without_empty_children() {
        let tree = Tree::new(vec![Node::file("a.rs", "a.rs")]);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["name"], "/");
        assert_eq!(json["children"][0]["kind"], "file");
        assert!(json["children"][0].get("children").is_none());
        assert!(json["children"][0].get("sha").is_none());
    }

    #[test]
    fn test_sha_is_serialized_when_known() {
        let node = Node::file("a.rs", "a.rs").with_sha(Some("abc123".to_string()));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["sha"], "abc123");
    }
}
