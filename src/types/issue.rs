//! Issue and label data as the reconciler sees it.
//!
//! These are deliberately smaller than GitHub's JSON: only the fields that
//! feed classification, label diffing and logging are kept.

use serde::{Deserialize, Serialize};

use super::ids::{IssueNumber, RepoId};

/// An issue as observed from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueData {
    /// The issue number.
    pub number: IssueNumber,
    /// Browser URL of the issue, for logs.
    pub html_url: String,
    /// The issue title.
    pub title: String,
    /// The issue body (the pull request description). Never classified.
    pub body: Option<String>,
    /// Names of the labels currently on the issue.
    pub labels: Vec<String>,
    /// Whether the issue is backed by a pull request.
    pub is_pull_request: bool,
    /// The owning repository, when the payload identifies one.
    pub repo: Option<RepoId>,
}

/// A repository label definition (name and colour).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelData {
    pub name: String,
    /// Hex colour without the leading `#`.
    pub color: String,
}

impl LabelData {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        LabelData {
            name: name.into(),
            color: color.into(),
        }
    }
}
