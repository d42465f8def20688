//! GitHub effect interpreter using octocrab.
//!
//! List effects go through [`OctocrabClient::get_page`] so that pagination is
//! cursor-driven from the `Link` header. Writes use octocrab's typed issue API
//! where it fits and raw routes where label names must be path-encoded.
//!
//! Nothing here retries: a failed call is returned to the unit of work that
//! issued it.

use serde::Serialize;

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::pagination::{Page, PageCursor};
use crate::types::{IssueData, IssueNumber, LabelData, RepoId};

use super::client::OctocrabClient;
use super::error::GitHubApiError;
use super::models::{RawComment, RawIssue, RawLabel, RawRepository};

/// GitHub's maximum page size; fewer pages means fewer requests per walk.
const PER_PAGE: u32 = 100;

impl GitHubInterpreter for OctocrabClient {
    async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, GitHubApiError> {
        interpret_github_effect(self, effect).await
    }
}

/// Interprets a GitHub effect, executing it against the GitHub API.
pub async fn interpret_github_effect(
    client: &OctocrabClient,
    effect: GitHubEffect,
) -> Result<GitHubResponse, GitHubApiError> {
    match effect {
        GitHubEffect::ListOrgRepos { org, cursor } => list_org_repos(client, &org, cursor).await,
        GitHubEffect::ListOrgIssues { org, cursor } => list_org_issues(client, &org, cursor).await,
        GitHubEffect::ListIssueComments {
            repo,
            issue,
            cursor,
        } => list_issue_comments(client, &repo, issue, cursor).await,
        GitHubEffect::ListRepoLabels { repo, cursor } => {
            list_repo_labels(client, &repo, cursor).await
        }
        GitHubEffect::GetIssue { repo, issue } => get_issue(client, &repo, issue).await,
        GitHubEffect::ReplaceIssueLabels {
            repo,
            issue,
            labels,
        } => replace_issue_labels(client, &repo, issue, labels).await,
        GitHubEffect::CreateLabel { repo, label } => create_label(client, &repo, label).await,
        GitHubEffect::UpdateLabel {
            repo,
            current_name,
            label,
        } => update_label(client, &repo, &current_name, label).await,
        GitHubEffect::DeleteLabel { repo, name } => delete_label(client, &repo, &name).await,
    }
}

fn repo_path(repo: &RepoId) -> String {
    format!(
        "/repos/{}/{}",
        urlencoding::encode(&repo.owner),
        urlencoding::encode(&repo.repo)
    )
}

fn label_path(repo: &RepoId, name: &str) -> String {
    format!("{}/labels/{}", repo_path(repo), urlencoding::encode(name))
}

// ─── Listings ─────────────────────────────────────────────────────────────────

async fn list_org_repos(
    client: &OctocrabClient,
    org: &str,
    cursor: Option<PageCursor>,
) -> Result<GitHubResponse, GitHubApiError> {
    let path = format!(
        "/orgs/{}/repos?per_page={}",
        urlencoding::encode(org),
        PER_PAGE
    );
    let page: Page<RawRepository> = client.get_page(&path, cursor).await?;

    Ok(GitHubResponse::Repos(Page::new(
        page.items.iter().map(RawRepository::repo_id).collect(),
        page.next,
    )))
}

async fn list_org_issues(
    client: &OctocrabClient,
    org: &str,
    cursor: Option<PageCursor>,
) -> Result<GitHubResponse, GitHubApiError> {
    let path = format!(
        "/orgs/{}/issues?filter=all&sort=updated&direction=descending&per_page={}",
        urlencoding::encode(org),
        PER_PAGE
    );
    let page: Page<RawIssue> = client.get_page(&path, cursor).await?;

    Ok(GitHubResponse::Issues(Page::new(
        page.items
            .into_iter()
            .map(RawIssue::into_issue_data)
            .collect(),
        page.next,
    )))
}

async fn list_issue_comments(
    client: &OctocrabClient,
    repo: &RepoId,
    issue: IssueNumber,
    cursor: Option<PageCursor>,
) -> Result<GitHubResponse, GitHubApiError> {
    let path = format!(
        "{}/issues/{}/comments?per_page={}",
        repo_path(repo),
        issue.0,
        PER_PAGE
    );
    let page: Page<RawComment> = client.get_page(&path, cursor).await?;

    Ok(GitHubResponse::Comments(Page::new(
        page.items
            .into_iter()
            .map(|c| c.body.unwrap_or_default())
            .collect(),
        page.next,
    )))
}

async fn list_repo_labels(
    client: &OctocrabClient,
    repo: &RepoId,
    cursor: Option<PageCursor>,
) -> Result<GitHubResponse, GitHubApiError> {
    let path = format!("{}/labels?per_page={}", repo_path(repo), PER_PAGE);
    let page: Page<RawLabel> = client.get_page(&path, cursor).await?;

    Ok(GitHubResponse::Labels(Page::new(
        page.items.into_iter().map(LabelData::from).collect(),
        page.next,
    )))
}

// ─── Issues ───────────────────────────────────────────────────────────────────

async fn get_issue(
    client: &OctocrabClient,
    repo: &RepoId,
    issue: IssueNumber,
) -> Result<GitHubResponse, GitHubApiError> {
    let url = client.api_url(&format!("{}/issues/{}", repo_path(repo), issue.0));
    let (raw, _): (RawIssue, _) = client.get_json(&url).await?;

    let mut data: IssueData = raw.into_issue_data();
    data.repo.get_or_insert_with(|| repo.clone());
    Ok(GitHubResponse::Issue(data))
}

async fn replace_issue_labels(
    client: &OctocrabClient,
    repo: &RepoId,
    issue: IssueNumber,
    labels: Vec<String>,
) -> Result<GitHubResponse, GitHubApiError> {
    let result = client
        .inner()
        .issues(&repo.owner, &repo.repo)
        .replace_all_labels(issue.0, &labels[..])
        .await;

    match result {
        Ok(_) => Ok(GitHubResponse::LabelsReplaced),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

// ─── Repository labels ────────────────────────────────────────────────────────

async fn create_label(
    client: &OctocrabClient,
    repo: &RepoId,
    label: LabelData,
) -> Result<GitHubResponse, GitHubApiError> {
    let result = client
        .inner()
        .issues(&repo.owner, &repo.repo)
        .create_label(&label.name, &label.color, "")
        .await;

    match result {
        Ok(_) => Ok(GitHubResponse::LabelCreated),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

async fn update_label(
    client: &OctocrabClient,
    repo: &RepoId,
    current_name: &str,
    label: LabelData,
) -> Result<GitHubResponse, GitHubApiError> {
    #[derive(Serialize)]
    struct UpdateRequest {
        new_name: String,
        color: String,
    }

    let request = UpdateRequest {
        new_name: label.name,
        color: label.color,
    };

    let result: Result<serde_json::Value, _> = client
        .inner()
        .patch(label_path(repo, current_name), Some(&request))
        .await;

    match result {
        Ok(_) => Ok(GitHubResponse::LabelUpdated),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

async fn delete_label(
    client: &OctocrabClient,
    repo: &RepoId,
    name: &str,
) -> Result<GitHubResponse, GitHubApiError> {
    // DELETE answers 204 with an empty body, so only the status is checked.
    let url = client.api_url(&label_path(repo, name));
    let response = client
        .inner()
        ._delete(url.as_str(), None::<&()>)
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    octocrab::map_github_error(response)
        .await
        .map_err(GitHubApiError::from_octocrab)?;

    Ok(GitHubResponse::LabelDeleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_path_encodes_segments() {
        assert_eq!(repo_path(&RepoId::new("octocat", "hello")), "/repos/octocat/hello");
        assert_eq!(
            repo_path(&RepoId::new("octo cat", "a/b")),
            "/repos/octo%20cat/a%2Fb"
        );
    }

    #[test]
    fn label_path_encodes_spaces() {
        assert_eq!(
            label_path(&RepoId::new("octocat", "hello"), "Awaiting Cake"),
            "/repos/octocat/hello/labels/Awaiting%20Cake"
        );
    }

    #[test]
    fn label_path_encodes_colons() {
        assert_eq!(
            label_path(&RepoId::new("octocat", "hello"), "team:x"),
            "/repos/octocat/hello/labels/team%3Ax"
        );
    }
}
