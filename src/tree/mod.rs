// src/tree/mod.rs
// =============================================================================
// Repository tree model and the acquirer that builds it.
//
// Submodules:
// - node: Node / Tree types and traversal helpers
// - acquire: recursive listing of a repository into a Tree
// =============================================================================

mod acquire;
mod node;

pub use acquire::acquire_tree;
pub use node::{Node, Tree};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Node, Tree};

    //  /
    //  ├── README.md
    //  ├── src/
    //  │   ├── main.rs
    //  │   └── util/
    //  │       └── fmt.rs
    //  └── srcgen/
    //      └── out.rs
    pub fn sample_tree() -> Tree {
        Tree::new(vec![
            Node::file("README.md", "README.md"),
            Node::directory(
                "src",
                "src",
                vec![
                    Node::file("main.rs", "src/main.rs"),
                    Node::directory(
                        "util",
                        "src/util",
                        vec![Node::file("fmt.rs", "src/util/fmt.rs")],
                    ),
                ],
            ),
            Node::directory("srcgen", "srcgen", vec![Node::file("out.rs", "srcgen/out.rs")]),
        ])
    }
}
