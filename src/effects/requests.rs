//! Typed request helpers over [`GitHubInterpreter`].
//!
//! Each helper builds one effect, interprets it, and unwraps the response
//! variant that effect is expected to produce. A mismatched variant means the
//! interpreter is broken and surfaces as a permanent error.

use crate::github::GitHubApiError;
use crate::pagination::{Page, PageCursor, walk_pages};
use crate::types::{IssueData, IssueNumber, LabelData, RepoId};

use super::github::{GitHubEffect, GitHubResponse};
use super::interpreter::GitHubInterpreter;

fn unexpected(effect: &'static str, response: GitHubResponse) -> GitHubApiError {
    GitHubApiError::permanent_without_source(format!(
        "unexpected response to {}: {:?}",
        effect, response
    ))
}

// ─── Single pages ─────────────────────────────────────────────────────────────

pub async fn org_repos_page<G: GitHubInterpreter>(
    client: &G,
    org: &str,
    cursor: Option<PageCursor>,
) -> Result<Page<RepoId>, GitHubApiError> {
    let effect = GitHubEffect::ListOrgRepos {
        org: org.to_string(),
        cursor,
    };
    let name = effect.name();
    match client.interpret(effect).await? {
        GitHubResponse::Repos(page) => Ok(page),
        other => Err(unexpected(name, other)),
    }
}

pub async fn org_issues_page<G: GitHubInterpreter>(
    client: &G,
    org: &str,
    cursor: Option<PageCursor>,
) -> Result<Page<IssueData>, GitHubApiError> {
    let effect = GitHubEffect::ListOrgIssues {
        org: org.to_string(),
        cursor,
    };
    let name = effect.name();
    match client.interpret(effect).await? {
        GitHubResponse::Issues(page) => Ok(page),
        other => Err(unexpected(name, other)),
    }
}

pub async fn issue_comments_page<G: GitHubInterpreter>(
    client: &G,
    repo: &RepoId,
    issue: IssueNumber,
    cursor: Option<PageCursor>,
) -> Result<Page<String>, GitHubApiError> {
    let effect = GitHubEffect::ListIssueComments {
        repo: repo.clone(),
        issue,
        cursor,
    };
    let name = effect.name();
    match client.interpret(effect).await? {
        GitHubResponse::Comments(page) => Ok(page),
        other => Err(unexpected(name, other)),
    }
}

pub async fn repo_labels_page<G: GitHubInterpreter>(
    client: &G,
    repo: &RepoId,
    cursor: Option<PageCursor>,
) -> Result<Page<LabelData>, GitHubApiError> {
    let effect = GitHubEffect::ListRepoLabels {
        repo: repo.clone(),
        cursor,
    };
    let name = effect.name();
    match client.interpret(effect).await? {
        GitHubResponse::Labels(page) => Ok(page),
        other => Err(unexpected(name, other)),
    }
}

// ─── Full collections ─────────────────────────────────────────────────────────

/// Every comment body on an issue, oldest first.
pub async fn list_issue_comments<G: GitHubInterpreter>(
    client: &G,
    repo: &RepoId,
    issue: IssueNumber,
) -> Result<Vec<String>, GitHubApiError> {
    walk_pages(|cursor| issue_comments_page(client, repo, issue, cursor)).await
}

/// Every label definition in a repository.
pub async fn list_repo_labels<G: GitHubInterpreter>(
    client: &G,
    repo: &RepoId,
) -> Result<Vec<LabelData>, GitHubApiError> {
    walk_pages(|cursor| repo_labels_page(client, repo, cursor)).await
}

// ─── Single resources and writes ──────────────────────────────────────────────

pub async fn get_issue<G: GitHubInterpreter>(
    client: &G,
    repo: &RepoId,
    issue: IssueNumber,
) -> Result<IssueData, GitHubApiError> {
    let effect = GitHubEffect::GetIssue {
        repo: repo.clone(),
        issue,
    };
    let name = effect.name();
    match client.interpret(effect).await? {
        GitHubResponse::Issue(data) => Ok(data),
        other => Err(unexpected(name, other)),
    }
}

pub async fn replace_issue_labels<G: GitHubInterpreter>(
    client: &G,
    repo: &RepoId,
    issue: IssueNumber,
    labels: Vec<String>,
) -> Result<(), GitHubApiError> {
    let effect = GitHubEffect::ReplaceIssueLabels {
        repo: repo.clone(),
        issue,
        labels,
    };
    let name = effect.name();
    match client.interpret(effect).await? {
        GitHubResponse::LabelsReplaced => Ok(()),
        other => Err(unexpected(name, other)),
    }
}

pub async fn create_label<G: GitHubInterpreter>(
    client: &G,
    repo: &RepoId,
    label: LabelData,
) -> Result<(), GitHubApiError> {
    let effect = GitHubEffect::CreateLabel {
        repo: repo.clone(),
        label,
    };
    let name = effect.name();
    match client.interpret(effect).await? {
        GitHubResponse::LabelCreated => Ok(()),
        other => Err(unexpected(name, other)),
    }
}

pub async fn update_label<G: GitHubInterpreter>(
    client: &G,
    repo: &RepoId,
    current_name: String,
    label: LabelData,
) -> Result<(), GitHubApiError> {
    let effect = GitHubEffect::UpdateLabel {
        repo: repo.clone(),
        current_name,
        label,
    };
    let name = effect.name();
    match client.interpret(effect).await? {
        GitHubResponse::LabelUpdated => Ok(()),
        other => Err(unexpected(name, other)),
    }
}

pub async fn delete_label<G: GitHubInterpreter>(
    client: &G,
    repo: &RepoId,
    label_name: String,
) -> Result<(), GitHubApiError> {
    let effect = GitHubEffect::DeleteLabel {
        repo: repo.clone(),
        name: label_name,
    };
    let name = effect.name();
    match client.interpret(effect).await? {
        GitHubResponse::LabelDeleted => Ok(()),
        other => Err(unexpected(name, other)),
    }
}
