//! Raw GitHub JSON structures.
//!
//! These match the shapes GitHub returns from the REST API and embeds in
//! webhook payloads. Fields the bot does not use are ignored; optional fields
//! use `Option`/`default` so that a sparse payload still decodes.

use serde::Deserialize;

use crate::types::{IssueData, IssueNumber, LabelData, RepoId};

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawOwner {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRepository {
    pub name: String,
    pub owner: RawOwner,
}

impl RawRepository {
    pub fn repo_id(&self) -> RepoId {
        RepoId::new(&self.owner.login, &self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawLabel {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl From<RawLabel> for LabelData {
    fn from(raw: RawLabel) -> Self {
        LabelData::new(raw.name, raw.color)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawComment {
    #[serde(default)]
    pub body: Option<String>,
}

/// A pull request object, as found in `pull_request` webhook payloads.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPullRequest {
    pub number: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawIssue {
    /// Zero when absent; webhook payloads sometimes carry a stub issue.
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    /// Present (with links) only when the issue backs a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
    /// Included by the organization-wide issues endpoint.
    #[serde(default)]
    pub repository: Option<RawRepository>,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl RawIssue {
    /// The owning repository: the embedded object if present, otherwise
    /// whatever the API URLs reveal.
    fn repo_id(&self) -> Option<RepoId> {
        self.repository
            .as_ref()
            .map(RawRepository::repo_id)
            .or_else(|| {
                self.repository_url
                    .as_deref()
                    .and_then(RepoId::from_issue_url)
            })
            .or_else(|| self.url.as_deref().and_then(RepoId::from_issue_url))
    }

    pub fn into_issue_data(self) -> IssueData {
        let repo = self.repo_id();
        IssueData {
            number: IssueNumber(self.number),
            html_url: self.html_url,
            title: self.title,
            body: self.body,
            labels: self.labels.into_iter().map(|l| l.name).collect(),
            is_pull_request: self.pull_request.is_some(),
            repo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pull_request_issue_decodes() {
        let raw: RawIssue = serde_json::from_value(json!({
            "number": 42,
            "html_url": "https://github.com/octocat/hello/pull/42",
            "title": "Add feature",
            "body": "Closes #1",
            "labels": [{ "name": "team:x", "color": "ededed" }],
            "pull_request": { "url": "https://api.github.com/repos/octocat/hello/pulls/42" },
            "repository": { "name": "hello", "owner": { "login": "octocat" } }
        }))
        .unwrap();

        let issue = raw.into_issue_data();
        assert_eq!(issue.number, IssueNumber(42));
        assert_eq!(issue.labels, vec!["team:x".to_string()]);
        assert!(issue.is_pull_request);
        assert_eq!(issue.repo, Some(RepoId::new("octocat", "hello")));
    }

    #[test]
    fn plain_issue_has_no_pull_request_linkage() {
        let raw: RawIssue = serde_json::from_value(json!({
            "number": 3,
            "title": "Bug",
            "pull_request": null
        }))
        .unwrap();

        let issue = raw.into_issue_data();
        assert!(!issue.is_pull_request);
        assert!(issue.labels.is_empty());
        assert_eq!(issue.repo, None);
    }

    #[test]
    fn repository_falls_back_to_api_urls() {
        let raw: RawIssue = serde_json::from_value(json!({
            "number": 9,
            "repository_url": "https://api.github.com/repos/octocat/hello"
        }))
        .unwrap();
        assert_eq!(raw.into_issue_data().repo, Some(RepoId::new("octocat", "hello")));

        let raw: RawIssue = serde_json::from_value(json!({
            "number": 9,
            "url": "https://api.github.com/repos/octocat/other/issues/9"
        }))
        .unwrap();
        assert_eq!(raw.into_issue_data().repo, Some(RepoId::new("octocat", "other")));
    }
}
