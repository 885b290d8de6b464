// src/github/mod.rs
// =============================================================================
// Everything that talks to (or stands in for) the repository host.
//
// - repo: parses "owner/repo" identifiers out of GitHub URLs
// - provider: the RepositoryProvider trait the core pipeline depends on
// - client: the GitHub REST implementation of that trait
// - decode: turns encoded file payloads into text
// =============================================================================

mod client;
mod decode;
mod provider;
mod repo;

#[cfg(test)]
pub mod mock;

pub use client::GithubClient;
pub use decode::decode_content;
pub use provider::{DirEntry, EntryKind, RepoSummary, RepositoryProvider};
pub use repo::RepoId;
