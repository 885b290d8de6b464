// src/error.rs
// =============================================================================
// Error types shared by the provider, tree, selection and export layers.
//
// The application layer (main.rs) still uses anyhow::Result, but everything
// below it returns one of these typed errors so callers can match on the
// category instead of parsing strings.
//
// Rust concepts:
// - thiserror: derives Display and std::error::Error from attributes
// - #[source]: chains an inner error so anyhow can print the whole cause
// =============================================================================

use thiserror::Error;

/// Failures reported by a repository provider (listing or file content).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// HTTP 404: the repository or path does not exist, or is private
    #[error("repository not found or private")]
    NotFoundOrPrivate,
    /// HTTP 401, or a 403 that is not a rate limit
    #[error("invalid GitHub token or unauthorized access")]
    Unauthorized,
    /// HTTP 429, or a 403 mentioning the rate limit
    #[error("API rate limit exceeded")]
    RateLimited,
    /// HTTP 422
    #[error("invalid request parameters: {0}")]
    ValidationFailed(String),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    NetworkError(String),
    #[error("GitHub API error{}: {}", status_suffix(*.status), .message)]
    Unknown { status: Option<u16>, message: String },
}

fn status_suffix(status: Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

impl ProviderError {
    // Short label for the category, used as a heading when reporting
    pub fn category(&self) -> &'static str {
        match self {
            ProviderError::NotFoundOrPrivate => "Repository not found or private",
            ProviderError::Unauthorized => "Unauthorized",
            ProviderError::RateLimited => "Rate limited",
            ProviderError::ValidationFailed(_) => "Invalid request",
            ProviderError::Timeout => "Timed out",
            ProviderError::NetworkError(_) => "Connection error",
            ProviderError::Unknown { .. } => "Unexpected error",
        }
    }

    // Remediation steps shown under the category heading
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            ProviderError::NotFoundOrPrivate => &[
                "Check that the repository URL is correct (github.com/owner/repo)",
                "If the repository is private, pass a token with --token or GITHUB_TOKEN",
            ],
            ProviderError::Unauthorized => &[
                "Check that the token is valid and has not expired",
                "Make sure the token has read access to this repository",
            ],
            ProviderError::RateLimited => &[
                "Wait for the rate limit window to reset",
                "Authenticated requests get a much higher limit: pass --token",
            ],
            ProviderError::ValidationFailed(_) => &["Check the repository identifier and path"],
            ProviderError::Timeout => &[
                "Try again in a few moments",
                "Raise the request timeout with --timeout",
            ],
            ProviderError::NetworkError(_) => &[
                "Check your internet connection",
                "Verify that the GitHub API is reachable",
            ],
            ProviderError::Unknown { .. } => &["Try again later"],
        }
    }
}

/// Terminal failure of a tree acquisition. No partial tree accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    /// The repository lookup failed before any listing was attempted
    #[error("cannot access repository: {0}")]
    Describe(#[source] ProviderError),
    /// A directory listing failed; `path` is "" for the repository root
    #[error("failed to list '{path}': {source}")]
    Listing {
        path: String,
        #[source]
        source: ProviderError,
    },
}

impl AcquireError {
    pub fn listing(path: impl Into<String>, source: ProviderError) -> Self {
        AcquireError::Listing {
            path: path.into(),
            source,
        }
    }

    pub fn provider_error(&self) -> &ProviderError {
        match self {
            AcquireError::Describe(source) | AcquireError::Listing { source, .. } => source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no repository tree is loaded")]
    NoTree,
    #[error("path '{0}' does not exist in the repository tree")]
    UnknownPath(String),
    #[error("path '{0}' is not a file")]
    NotAFile(String),
    #[error("'{0}' is not a file extension")]
    InvalidExtension(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("please select at least one file to export")]
    EmptySelection,
}

/// Failure to turn a provider payload into text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unsupported content encoding '{0}'")]
    UnsupportedEncoding(String),
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Why one file could not be included in an export
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoIdError {
    #[error("not a GitHub repository URL: {0}")]
    NotGithub(String),
    #[error("invalid repository format (expected github.com/owner/repo): {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_error_message_includes_status() {
        let err = ProviderError::Unknown {
            status: Some(500),
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API error (HTTP 500): boom");

        let err = ProviderError::Unknown {
            status: None,
            message: "bad body".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API error: bad body");
    }

    #[test]
    fn test_acquire_error_names_failing_path() {
        let err = AcquireError::listing("src/nested", ProviderError::Timeout);
        assert_eq!(err.to_string(), "failed to list 'src/nested': request timed out");
        assert_eq!(err.provider_error().category(), "Timed out");

        let err = AcquireError::Describe(ProviderError::NotFoundOrPrivate);
        assert_eq!(
            err.to_string(),
            "cannot access repository: repository not found or private"
        );
    }

    #[test]
    fn test_every_category_has_hints() {
        let all = [
            ProviderError::NotFoundOrPrivate,
            ProviderError::Unauthorized,
            ProviderError::RateLimited,
            ProviderError::ValidationFailed(String::new()),
            ProviderError::Timeout,
            ProviderError::NetworkError(String::new()),
            ProviderError::Unknown {
                status: None,
                message: String::new(),
            },
        ];
        for err in all {
            assert!(!err.hints().is_empty(), "{:?} has no hints", err);
        }
    }
}
