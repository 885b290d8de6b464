// src/github/client.rs
// =============================================================================
// RepositoryProvider backed by the GitHub REST API.
//
// Endpoints used:
// - GET /repos/{owner}/{repo}                   repository lookup
// - GET /repos/{owner}/{repo}/contents/{path}   directory listing / file content
//
// Every non-success status and every transport failure is classified into
// a ProviderError, so callers never see raw reqwest errors.
// =============================================================================

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::provider::{DirEntry, EncodedContent, EntryKind, RepoSummary, RepositoryProvider};
use super::repo::RepoId;
use crate::config::SessionConfig;
use crate::error::ProviderError;

// One element of a contents listing
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
    sha: Option<String>,
}

// The contents endpoint called on a single file
#[derive(Debug, Deserialize)]
struct FileResponse {
    encoding: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepoResponse {
    full_name: String,
    default_branch: String,
    #[serde(default)]
    private: bool,
}

// Error bodies look like {"message": "...", "documentation_url": "..."}
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct GithubClient {
    http: Client,
    api_url: Url,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        Self::with_builder(config, Client::builder())
    }

    fn with_builder(config: &SessionConfig, builder: ClientBuilder) -> Result<Self> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| anyhow!("Invalid API URL '{}': {}", config.api_url, e))?;
        if api_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid API URL '{}'", config.api_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        // One client for every request (connection pooling)
        let http = builder
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_url,
            token: config.token.clone(),
        })
    }

    // /repos/{owner}/{repo} followed by any extra segments, each one encoded
    fn repo_url<'a>(&self, repo: &RepoId, extra: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("repos")
                .push(&repo.owner)
                .push(&repo.name)
                .extend(extra);
        }
        url
    }

    fn contents_url(&self, repo: &RepoId, path: &str) -> Url {
        let segments = std::iter::once("contents").chain(path.split('/').filter(|s| !s.is_empty()));
        self.repo_url(repo, segments)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        debug!(%url, "GET");

        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(categorize_error)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(classify_status(status, &message));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::Unknown {
                    status: Some(status.as_u16()),
                    message: format!("unexpected response body: {}", e),
                }
            }
        })
    }
}

#[async_trait]
impl RepositoryProvider for GithubClient {
    async fn describe_repository(&self, repo: &RepoId) -> Result<RepoSummary, ProviderError> {
        let info: RepoResponse = self.get_json(self.repo_url(repo, std::iter::empty::<&str>())).await?;
        Ok(RepoSummary {
            full_name: info.full_name,
            default_branch: info.default_branch,
            private: info.private,
        })
    }

    async fn list_directory(
        &self,
        repo: &RepoId,
        path: &str,
    ) -> Result<Vec<DirEntry>, ProviderError> {
        let entries: Vec<ContentEntry> = self.get_json(self.contents_url(repo, path)).await?;

        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let kind = match entry.kind.as_str() {
                    "dir" => EntryKind::Directory,
                    "file" | "symlink" => EntryKind::File,
                    other => {
                        // Submodules have no retrievable content
                        debug!(path = %entry.path, kind = other, "skipping entry");
                        return None;
                    }
                };
                Some(DirEntry {
                    name: entry.name,
                    path: entry.path,
                    kind,
                    sha: entry.sha,
                })
            })
            .collect())
    }

    async fn get_file_content(
        &self,
        repo: &RepoId,
        path: &str,
    ) -> Result<EncodedContent, ProviderError> {
        let file: FileResponse = self.get_json(self.contents_url(repo, path)).await?;
        Ok(EncodedContent {
            encoding: file.encoding.unwrap_or_else(|| "none".to_string()),
            payload: file.content.unwrap_or_default(),
        })
    }
}

// Maps a non-success HTTP status (plus the API's error message) to a category
fn classify_status(status: StatusCode, message: &str) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED => ProviderError::Unauthorized,
        StatusCode::FORBIDDEN if message.to_lowercase().contains("rate limit") => {
            ProviderError::RateLimited
        }
        StatusCode::FORBIDDEN => ProviderError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
        StatusCode::NOT_FOUND => ProviderError::NotFoundOrPrivate,
        StatusCode::UNPROCESSABLE_ENTITY => ProviderError::ValidationFailed(message.to_string()),
        _ => ProviderError::Unknown {
            status: Some(status.as_u16()),
            message: message.to_string(),
        },
    }
}

// Categorizes transport-level failures from reqwest
fn categorize_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else if error.is_connect() {
        ProviderError::NetworkError(format!("connection failed: {}", error))
    } else if error.is_request() {
        ProviderError::NetworkError(error.to_string())
    } else {
        ProviderError::Unknown {
            status: error.status().map(|s| s.as_u16()),
            message: error.to_string(),
        }
    }
}
