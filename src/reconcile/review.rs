//! Review requests: a pull request issue plus its complete comment history.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::effects::GitHubInterpreter;
use crate::effects::requests::list_issue_comments;
use crate::github::GitHubApiError;
use crate::status::classify;
use crate::types::{IssueData, IssueNumber, RepoId, StatusLabel};

/// A pull request under review, as input to one reconciliation pass.
///
/// Built once, never mutated, and dropped after the pass. The comment list is
/// always complete: [`ReviewRequest::load`] fails rather than return a request
/// built from a partial comment walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    repo: RepoId,
    issue: IssueData,
    comments: Vec<String>,
}

impl ReviewRequest {
    pub fn new(repo: RepoId, issue: IssueData, comments: Vec<String>) -> Self {
        ReviewRequest {
            repo,
            issue,
            comments,
        }
    }

    /// Fetches every comment of `issue` and builds the review request.
    pub async fn load<G: GitHubInterpreter>(
        client: &G,
        repo: RepoId,
        issue: IssueData,
    ) -> Result<Self, GitHubApiError> {
        let comments = list_issue_comments(client, &repo, issue.number).await?;
        debug!(
            repo = %repo,
            issue = %issue.number,
            comments = comments.len(),
            "Loaded review comments"
        );
        Ok(ReviewRequest::new(repo, issue, comments))
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    pub fn issue(&self) -> &IssueData {
        &self.issue
    }

    pub fn number(&self) -> IssueNumber {
        self.issue.number
    }

    pub fn url(&self) -> &str {
        &self.issue.html_url
    }

    pub fn title(&self) -> &str {
        &self.issue.title
    }

    /// Labels currently on the issue.
    pub fn labels(&self) -> &[String] {
        &self.issue.labels
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// The status this pull request should carry.
    pub fn status(&self) -> StatusLabel {
        classify(&self.issue.title, &self.comments)
    }

    /// Trello card links mentioned in the description or any comment.
    pub fn trello_card_urls(&self) -> Vec<&str> {
        self.issue
            .body
            .iter()
            .chain(&self.comments)
            .flat_map(|text| TRELLO_URL.find_iter(text).map(|m| m.as_str()))
            .collect()
    }
}

/// A Trello link runs until whitespace or a parenthesis, so markdown
/// `[card](url)` links come out clean.
static TRELLO_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://trello\.com/[^\s()]+").unwrap());
