// src/github/repo.rs
// =============================================================================
// Parses the repository identifier the user types on the command line.
//
// Supported formats:
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - https://github.com/owner/repo/
//   - github.com/owner/repo (with or without www.)
//   - owner/repo
//
// Anything with extra path segments (e.g. /tree/main) is rejected, because
// the listing always starts at the repository root.
// =============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::RepoIdError;

/// An `owner/name` pair identifying one GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = RepoIdError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_github_url(input)
    }
}

// Extracts owner and repository name from a URL or an owner/repo pair
fn parse_github_url(input: &str) -> Result<RepoId, RepoIdError> {
    let trimmed = input.trim();

    // Remove common prefixes
    let rest = trimmed
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    // A scheme means the user typed a URL, so the host has to be github.com
    let had_scheme = trimmed.starts_with("https://") || trimmed.starts_with("http://");
    let path = if let Some(path) = rest.strip_prefix("github.com/") {
        path
    } else if had_scheme || rest.contains(':') {
        return Err(RepoIdError::NotGithub(input.to_string()));
    } else {
        rest
    };

    let path = path.strip_suffix('/').unwrap_or(path);
    let parts: Vec<&str> = path.split('/').collect();

    if parts.len() != 2 {
        return Err(RepoIdError::InvalidFormat(input.to_string()));
    }

    let owner = parts[0];
    let name = parts[1].strip_suffix(".git").unwrap_or(parts[1]);

    if !is_valid_owner(owner) || !is_valid_name(name) {
        return Err(RepoIdError::InvalidFormat(input.to_string()));
    }

    Ok(RepoId::new(owner, name))
}

fn is_valid_owner(owner: &str) -> bool {
    !owner.is_empty()
        && owner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_github_url() {
        let repo: RepoId = "https://github.com/rust-lang/rust".parse().unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "rust");
    }

    #[test]
    fn test_parse_github_url_with_git() {
        let repo: RepoId = "https://github.com/user/repo.git".parse().unwrap();
        assert_eq!(repo, RepoId::new("user", "repo"));
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(
            "github.com/user/repo/".parse::<RepoId>().unwrap(),
            RepoId::new("user", "repo")
        );
        assert_eq!(
            "www.github.com/user/my.repo".parse::<RepoId>().unwrap(),
            RepoId::new("user", "my.repo")
        );
        assert_eq!(
            "user/repo".parse::<RepoId>().unwrap(),
            RepoId::new("user", "repo")
        );
    }

    #[test]
    fn test_parse_invalid_url() {
        let result = "https://gitlab.com/user/repo".parse::<RepoId>();
        assert!(matches!(result, Err(RepoIdError::NotGithub(_))));
    }

    #[test]
    fn test_reject_extra_segments_and_bad_chars() {
        assert!(matches!(
            "https://github.com/user/repo/tree/main".parse::<RepoId>(),
            Err(RepoIdError::InvalidFormat(_))
        ));
        assert!(matches!(
            "https://github.com/us er/repo".parse::<RepoId>(),
            Err(RepoIdError::InvalidFormat(_))
        ));
        assert!("https://github.com/user".parse::<RepoId>().is_err());
    }

    #[test]
    fn test_display_is_owner_slash_name() {
        assert_eq!(RepoId::new("a", "b").to_string(), "a/b");
    }
}
