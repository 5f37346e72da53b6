//! Repository identifiers: validation, normalization and routing paths.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::INVALID_URL_MESSAGE;

/// `(https://)?github.com/<org>/<repo>` followed by an optional path, query
/// or fragment, case-insensitive.
static REPOSITORY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:https://?)?(github\.com)/([\w.-]+)/([\w.-]+)(?:[/?#].*)?$")
        .expect("repository pattern is valid")
});

/// Normalized `host/org/repo` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryId(String);

/// Input that does not look like a repository link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    pub input: String,
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(INVALID_URL_MESSAGE)
    }
}

impl std::error::Error for RepositoryError {}

impl RepositoryId {
    /// Validate user input and normalize it.
    ///
    /// The scheme is dropped, the host lower-cased, a trailing `.git` removed
    /// and anything after `org/repo` ignored.
    pub fn parse(input: &str) -> Result<Self, RepositoryError> {
        let trimmed = input.trim();
        let invalid = || RepositoryError {
            input: input.to_string(),
        };
        let captures = REPOSITORY_PATTERN.captures(trimmed).ok_or_else(invalid)?;

        let host = captures[1].to_ascii_lowercase();
        let org = &captures[2];
        let repo = captures[3].strip_suffix(".git").unwrap_or(&captures[3]);
        if repo.is_empty() || org.chars().all(|c| c == '.') || repo.chars().all(|c| c == '.') {
            return Err(invalid());
        }
        Ok(Self(format!("{host}/{org}/{repo}")))
    }

    /// Recover an identifier from a client route such as `/github.com/org/repo`.
    pub fn from_route_path(path: &str) -> Option<Self> {
        let path = path.trim_start_matches('#').trim_start_matches('/');
        if path.is_empty() {
            return None;
        }
        Self::parse(path).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Client route reflecting this repository.
    pub fn route_path(&self) -> String {
        format!("/{}", self.0)
    }

    /// `org/repo` part, used for compact labels.
    pub fn short_name(&self) -> &str {
        self.0.split_once('/').map_or(&self.0, |(_, rest)| rest)
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
