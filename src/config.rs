// src/config.rs
// =============================================================================
// Per-session configuration.
//
// Everything that would otherwise be global state (API endpoint, token,
// which extensions start out enabled) lives in one SessionConfig value that
// is built from the command line and handed to the pieces that need it.
// =============================================================================

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_EXPORT_PREFIX: &str = "repo-export";

// Extensions shown as enabled before the user touches anything
const DEFAULT_ENABLED_EXTENSIONS: [&str; 4] = [".js", ".jsx", ".ts", ".css"];

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
    /// 1 = strictly sequential acquisition, >1 = bounded fan-out per directory
    pub concurrency: usize,
    pub enabled_extensions: BTreeSet<String>,
    pub export_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            concurrency: 1,
            enabled_extensions: DEFAULT_ENABLED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }
}

impl SessionConfig {
    // Sets the token, ignoring blank values, and warns when it does not look
    // like a GitHub token. It is still used: the API has the final word.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if let Some(token) = &self.token {
            if !looks_like_github_token(token) {
                warn!("token does not look like a GitHub personal access token");
            }
        }
        self
    }
}

// Classic PATs are "ghp_" + 36 characters; fine-grained ones start with "github_pat_"
pub fn looks_like_github_token(token: &str) -> bool {
    (token.starts_with("ghp_") && token.len() == 40) || token.starts_with("github_pat_")
}
