// src/tree/acquire.rs
// =============================================================================
// Builds a Tree by recursively listing a repository.
//
// How it works:
// 1. List the repository root
// 2. For each entry, in provider order: if it is a directory, list it (and
//    everything below it) before moving on to the next sibling; if it is a
//    file, record a leaf
// 3. Any failed listing aborts the whole acquisition
//
// With concurrency = 1 there is never more than one request in flight and the
// tree keeps the provider's ordering. With concurrency > 1, the subdirectories
// of each directory are listed in parallel (bounded), and each directory's
// children are then stable-sorted by name so the result does not depend on
// which request finished first.
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use super::node::{Node, Tree};
use crate::error::AcquireError;
use crate::github::{DirEntry, EntryKind, RepoId, RepositoryProvider};

pub async fn acquire_tree<P>(
    provider: &P,
    repo: &RepoId,
    concurrency: usize,
) -> Result<Tree, AcquireError>
where
    P: RepositoryProvider + ?Sized,
{
    let children = list_recursive(provider, repo, String::new(), concurrency.max(1)).await?;
    let tree = Tree::new(children);

    info!(
        repo = %repo,
        files = tree.file_count(),
        directories = tree.directory_count(),
        "acquired repository tree"
    );
    Ok(tree)
}

// Recursive async fns need an explicit boxed future
fn list_recursive<'a, P>(
    provider: &'a P,
    repo: &'a RepoId,
    path: String,
    concurrency: usize,
) -> BoxFuture<'a, Result<Vec<Node>, AcquireError>>
where
    P: RepositoryProvider + ?Sized,
{
    async move {
        debug!(path = %path, "listing directory");

        let entries = provider
            .list_directory(repo, &path)
            .await
            .map_err(|e| AcquireError::listing(path.clone(), e))?;

        if concurrency == 1 {
            let mut nodes = Vec::with_capacity(entries.len());
            for entry in entries {
                nodes.push(build_node(provider, repo, entry, concurrency).await?);
            }
            Ok(nodes)
        } else {
            let mut nodes: Vec<Node> = stream::iter(entries)
                .map(|entry| build_node(provider, repo, entry, concurrency))
                .buffer_unordered(concurrency)
                .try_collect()
                .await?;
            nodes.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(nodes)
        }
    }
    .boxed()
}

async fn build_node<P>(
    provider: &P,
    repo: &RepoId,
    entry: DirEntry,
    concurrency: usize,
) -> Result<Node, AcquireError>
where
    P: RepositoryProvider + ?Sized,
{
    let node = match entry.kind {
        EntryKind::Directory => {
            // Recurse: the whole subtree is listed before this node is returned
            let children = list_recursive(provider, repo, entry.path.clone(), concurrency).await?;
            Node::directory(entry.name, entry.path, children)
        }
        EntryKind::File => Node::file(entry.name, entry.path),
    };
    Ok(node.with_sha(entry.sha))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why BoxFuture?
//    - An async fn that calls itself would have an infinitely sized future type
//    - Boxing the future gives it a fixed size (a pointer), which breaks the cycle
//    - .boxed() is the futures crate helper that does the boxing
//
// 2. What is buffer_unordered?
//    - Runs up to N futures from a stream at the same time
//    - Yields results in completion order, not input order
//    - That is why the fan-out branch sorts the children afterwards
//
// 3. What does try_collect do?
//    - Collects a stream of Results into a Result<Vec<_>>
//    - Stops at the first Err, so one failed listing fails the whole tree
//
// 4. What does P: ?Sized mean?
//    - P may be an unsized type such as dyn RepositoryProvider
//    - Lets callers pass either a concrete client or a trait object
// -----------------------------------------------------------------------------
