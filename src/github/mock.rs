// src/github/mock.rs
// =============================================================================
// In-memory RepositoryProvider for tests.
//
// Directories and files are registered up front; individual paths can be
// made to fail. Every call is recorded so tests can assert on request order,
// request counts, and the absence of network activity.
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::provider::{DirEntry, EncodedContent, RepoSummary, RepositoryProvider};
use super::repo::RepoId;
use crate::error::ProviderError;

/// Failure key that makes describe_repository fail
pub const REPO_DESCRIBE: &str = "@repo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Describe,
    List(String),
    Content(String),
}

#[derive(Default)]
pub struct MockProvider {
    listings: HashMap<String, Vec<DirEntry>>,
    files: HashMap<String, String>,
    failures: HashMap<String, ProviderError>,
    // Paths served with a transport encoding other than base64
    encodings: HashMap<String, String>,
    calls: Mutex<Vec<Call>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    // Builds a provider from flat file paths; intermediate directories are
    // registered automatically, siblings keep insertion order
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let mut mock = Self::new();
        mock.listings.entry(String::new()).or_default();

        for (path, content) in files {
            let mut parent = String::new();
            let segments: Vec<&str> = path.split('/').collect();

            for (i, segment) in segments.iter().enumerate() {
                let current = if parent.is_empty() {
                    segment.to_string()
                } else {
                    format!("{}/{}", parent, segment)
                };
                let is_leaf = i == segments.len() - 1;
                let siblings = mock.listings.entry(parent.clone()).or_default();

                if !siblings.iter().any(|e| e.path == current) {
                    if is_leaf {
                        siblings.push(DirEntry::file(*segment, current.clone()));
                    } else {
                        siblings.push(DirEntry::directory(*segment, current.clone()));
                    }
                }
                if !is_leaf {
                    mock.listings.entry(current.clone()).or_default();
                }
                parent = current;
            }

            mock.files.insert(path.to_string(), content.to_string());
        }

        mock
    }

    pub fn fail(mut self, path: &str, error: ProviderError) -> Self {
        self.failures.insert(path.to_string(), error);
        self
    }

    // Serves `path` with the given encoding and its content passed through as-is,
    // the way GitHub answers with "none" for large files
    pub fn with_encoding(mut self, path: &str, encoding: &str) -> Self {
        self.encodings.insert(path.to_string(), encoding.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn listed_paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::List(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn content_requests(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Content(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(&self, path: &str) -> Result<(), ProviderError> {
        match self.failures.get(path) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RepositoryProvider for MockProvider {
    async fn describe_repository(&self, repo: &RepoId) -> Result<RepoSummary, ProviderError> {
        self.record(Call::Describe);
        self.failure(REPO_DESCRIBE)?;
        Ok(RepoSummary {
            full_name: repo.to_string(),
            default_branch: "main".to_string(),
            private: false,
        })
    }

    async fn list_directory(
        &self,
        _repo: &RepoId,
        path: &str,
    ) -> Result<Vec<DirEntry>, ProviderError> {
        self.record(Call::List(path.to_string()));
        // Give other tasks a chance to run, like a real request would
        tokio::task::yield_now().await;
        self.failure(path)?;
        self.listings
            .get(path)
            .cloned()
            .ok_or(ProviderError::NotFoundOrPrivate)
    }

    async fn get_file_content(
        &self,
        _repo: &RepoId,
        path: &str,
    ) -> Result<EncodedContent, ProviderError> {
        self.record(Call::Content(path.to_string()));
        tokio::task::yield_now().await;
        self.failure(path)?;
        let content = self
            .files
            .get(path)
            .ok_or(ProviderError::NotFoundOrPrivate)?;
        match self.encodings.get(path) {
            Some(encoding) => Ok(EncodedContent {
                encoding: encoding.clone(),
                payload: content.clone(),
            }),
            None => Ok(EncodedContent {
                encoding: "base64".to_string(),
                payload: STANDARD.encode(content.as_bytes()),
            }),
        }
    }
}
