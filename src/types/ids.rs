//! Newtype wrappers for domain identifiers.
//!
//! These types keep issue numbers and repository coordinates from being mixed up
//! with the other integers and strings flowing through the reconciler.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An issue (or pull request) number within a repository.
///
/// GitHub shares one number space between issues and pull requests, so the
/// number of a pull request is also the number of its backing issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(pub u64);

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for IssueNumber {
    fn from(n: u64) -> Self {
        IssueNumber(n)
    }
}

/// A repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        RepoId {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Recovers the repository from an issue API URL.
    ///
    /// Accepts anything containing `repos/{owner}/{repo}/issues` or ending in
    /// `repos/{owner}/{repo}` (the `repository_url` form). Returns `None` when
    /// neither shape is present.
    ///
    /// ```
    /// use cakebot::types::RepoId;
    ///
    /// let repo = RepoId::from_issue_url("https://api.github.com/repos/octocat/hello/issues/42");
    /// assert_eq!(repo, Some(RepoId::new("octocat", "hello")));
    ///
    /// assert_eq!(RepoId::from_issue_url("https://example.com/nothing"), None);
    /// ```
    pub fn from_issue_url(url: &str) -> Option<Self> {
        let (_, rest) = url.split_once("repos/")?;
        let mut segments = rest.split('/');
        let owner = segments.next().filter(|s| !s.is_empty())?;
        let repo = segments.next().filter(|s| !s.is_empty())?;

        match segments.next() {
            None | Some("issues") => Some(RepoId::new(owner, repo)),
            Some(_) => None,
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
