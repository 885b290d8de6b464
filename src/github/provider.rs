// src/github/provider.rs
// =============================================================================
// The seam between the core pipeline and whatever serves repository data.
//
// The tree acquirer and the exporter only ever talk to a RepositoryProvider.
// In production that is the GitHub REST client (client.rs); in tests it is
// an in-memory mock, so the pipeline can be exercised without a network.
// =============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::repo::RepoId;
use crate::error::ProviderError;

/// Whether a listing entry is a file or a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry of a directory listing, in provider order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    /// Root-relative, slash-delimited path
    pub path: String,
    pub kind: EntryKind,
    pub sha: Option<String>,
}

// Shorthands for building listings by hand in tests
#[cfg(test)]
impl DirEntry {
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::File,
            sha: None,
        }
    }

    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::Directory,
            sha: None,
        }
    }
}

/// File content as delivered by the provider, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedContent {
    /// Transport encoding, e.g. "base64"
    pub encoding: String,
    pub payload: String,
}

/// Summary returned by the repository lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoSummary {
    pub full_name: String,
    pub default_branch: String,
    pub private: bool,
}

#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    /// Confirm the repository exists and is readable with the current credentials.
    async fn describe_repository(&self, repo: &RepoId) -> Result<RepoSummary, ProviderError>;

    /// List one directory. `path` is "" for the repository root.
    async fn list_directory(&self, repo: &RepoId, path: &str)
        -> Result<Vec<DirEntry>, ProviderError>;

    /// Fetch the encoded content of one file.
    async fn get_file_content(
        &self,
        repo: &RepoId,
        path: &str,
    ) -> Result<EncodedContent, ProviderError>;
}
