//! Shared test utilities: an in-memory GitHub organization.
//!
//! [`FakeGitHub`] interprets effects against in-memory repositories, records
//! every effect it sees, and applies writes so that a second pass observes the
//! first pass's changes. List effects are paged with a configurable page size
//! and opaque `fake://` cursors.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::github::GitHubApiError;
use crate::pagination::{Page, PageCursor};
use crate::types::{IssueData, IssueNumber, LabelData, RepoId};

const DEFAULT_PAGE_SIZE: usize = 30;

type FailurePredicate = Box<dyn Fn(&GitHubEffect) -> bool + Send + Sync>;

/// A pull request issue with no repository, labels or body.
pub fn pull_request(number: u64, title: &str, labels: &[&str]) -> IssueData {
    IssueData {
        number: IssueNumber(number),
        html_url: format!("https://github.com/octocat/hello/pull/{}", number),
        title: title.to_string(),
        body: None,
        labels: labels.iter().map(|l| l.to_string()).collect(),
        is_pull_request: true,
        repo: None,
    }
}

struct FakeIssue {
    data: IssueData,
    comments: Vec<String>,
}

#[derive(Default)]
struct FakeRepo {
    labels: Vec<LabelData>,
    issues: BTreeMap<u64, FakeIssue>,
}

#[derive(Default)]
struct FakeState {
    repo_order: Vec<RepoId>,
    repos: HashMap<RepoId, FakeRepo>,
    /// Org issues whose payload names no repository.
    orphans: Vec<IssueData>,
    effects: Vec<GitHubEffect>,
    fail_when: Option<FailurePredicate>,
}

/// An in-memory, stateful GitHub interpreter for tests.
///
/// Clones share state, so a clone handed to spawned tasks records into the
/// same effect log the test inspects.
#[derive(Clone)]
pub struct FakeGitHub {
    state: Arc<Mutex<FakeState>>,
    page_size: usize,
}

impl Default for FakeGitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGitHub {
    pub fn new() -> Self {
        FakeGitHub {
            state: Arc::new(Mutex::new(FakeState::default())),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        self.page_size = page_size;
        self
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn add_repo(&self, repo: RepoId, labels: Vec<LabelData>) {
        let mut state = self.lock();
        if !state.repos.contains_key(&repo) {
            state.repo_order.push(repo.clone());
        }
        state.repos.insert(
            repo,
            FakeRepo {
                labels,
                issues: BTreeMap::new(),
            },
        );
    }

    fn add_issue(&self, repo: &RepoId, data: IssueData, comments: &[&str]) -> IssueData {
        let mut state = self.lock();
        let fake = state
            .repos
            .get_mut(repo)
            .unwrap_or_else(|| panic!("unknown repo {}", repo));
        fake.issues.insert(
            data.number.0,
            FakeIssue {
                data: data.clone(),
                comments: comments.iter().map(|c| c.to_string()).collect(),
            },
        );
        data
    }

    /// Adds a pull request issue to `repo` and returns it as listed.
    pub fn add_pull_request(
        &self,
        repo: &RepoId,
        number: u64,
        title: &str,
        labels: &[&str],
        comments: &[&str],
    ) -> IssueData {
        let mut data = pull_request(number, title, labels);
        data.html_url = format!("https://github.com/{}/pull/{}", repo, number);
        data.repo = Some(repo.clone());
        self.add_issue(repo, data, comments)
    }

    /// Adds an issue with no pull request linkage.
    pub fn add_plain_issue(&self, repo: &RepoId, number: u64, title: &str) -> IssueData {
        let mut data = pull_request(number, title, &[]);
        data.html_url = format!("https://github.com/{}/issues/{}", repo, number);
        data.is_pull_request = false;
        data.repo = Some(repo.clone());
        self.add_issue(repo, data, &[])
    }

    /// Adds an org issue whose payload names no repository.
    pub fn add_orphan_issue(&self, issue: IssueData) {
        self.lock().orphans.push(issue);
    }

    /// Makes every effect matching `predicate` fail with a transient error.
    /// The effect is still recorded.
    pub fn fail_when(&self, predicate: impl Fn(&GitHubEffect) -> bool + Send + Sync + 'static) {
        self.lock().fail_when = Some(Box::new(predicate));
    }

    /// Every effect interpreted so far, in order.
    pub fn effects(&self) -> Vec<GitHubEffect> {
        self.lock().effects.clone()
    }

    /// Every write effect interpreted so far, including failed ones.
    pub fn writes(&self) -> Vec<GitHubEffect> {
        self.lock()
            .effects
            .iter()
            .filter(|e| e.is_write())
            .cloned()
            .collect()
    }

    pub fn clear_effects(&self) {
        self.lock().effects.clear();
    }

    /// Current state of an issue.
    pub fn issue(&self, repo: &RepoId, number: u64) -> IssueData {
        self.lock()
            .repos
            .get(repo)
            .and_then(|r| r.issues.get(&number))
            .map(|i| i.data.clone())
            .unwrap_or_else(|| panic!("unknown issue {}#{}", repo, number))
    }

    /// Current label definitions of a repository.
    pub fn repo_labels(&self, repo: &RepoId) -> Vec<LabelData> {
        self.lock()
            .repos
            .get(repo)
            .map(|r| r.labels.clone())
            .unwrap_or_else(|| panic!("unknown repo {}", repo))
    }

    fn paged<T: Clone>(&self, items: &[T], cursor: Option<&PageCursor>, kind: &str) -> Page<T> {
        let page: usize = cursor
            .and_then(|c| c.as_str().rsplit_once("page="))
            .and_then(|(_, n)| n.parse().ok())
            .unwrap_or(0);
        let start = (page * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        let next = (end < items.len())
            .then(|| PageCursor::new(format!("fake://{}?page={}", kind, page + 1)));
        Page::new(items[start..end].to_vec(), next)
    }

    fn apply(&self, effect: GitHubEffect) -> Result<GitHubResponse, GitHubApiError> {
        let mut state = self.lock();
        state.effects.push(effect.clone());
        if state.fail_when.as_ref().is_some_and(|f| f(&effect)) {
            return Err(GitHubApiError::transient_without_source(format!(
                "injected failure for {}",
                effect
            )));
        }

        match effect {
            GitHubEffect::ListOrgRepos { cursor, .. } => {
                let repos = state.repo_order.clone();
                Ok(GitHubResponse::Repos(self.paged(&repos, cursor.as_ref(), "repos")))
            }
            GitHubEffect::ListOrgIssues { cursor, .. } => {
                let mut issues: Vec<IssueData> = state
                    .repo_order
                    .iter()
                    .filter_map(|id| state.repos.get(id))
                    .flat_map(|r| r.issues.values().map(|i| i.data.clone()))
                    .collect();
                issues.extend(state.orphans.iter().cloned());
                Ok(GitHubResponse::Issues(self.paged(&issues, cursor.as_ref(), "issues")))
            }
            GitHubEffect::ListIssueComments {
                repo,
                issue,
                cursor,
            } => {
                let comments = state
                    .repos
                    .get(&repo)
                    .and_then(|r| r.issues.get(&issue.0))
                    .map(|i| i.comments.clone())
                    .ok_or_else(|| not_found(&repo, issue))?;
                Ok(GitHubResponse::Comments(self.paged(&comments, cursor.as_ref(), "comments")))
            }
            GitHubEffect::ListRepoLabels { repo, cursor } => {
                let labels = state
                    .repos
                    .get(&repo)
                    .map(|r| r.labels.clone())
                    .ok_or_else(|| unknown_repo(&repo))?;
                Ok(GitHubResponse::Labels(self.paged(&labels, cursor.as_ref(), "labels")))
            }
            GitHubEffect::GetIssue { repo, issue } => state
                .repos
                .get(&repo)
                .and_then(|r| r.issues.get(&issue.0))
                .map(|i| GitHubResponse::Issue(i.data.clone()))
                .ok_or_else(|| not_found(&repo, issue)),
            GitHubEffect::ReplaceIssueLabels {
                repo,
                issue,
                labels,
            } => {
                let data = state
                    .repos
                    .get_mut(&repo)
                    .and_then(|r| r.issues.get_mut(&issue.0))
                    .map(|i| &mut i.data)
                    .ok_or_else(|| not_found(&repo, issue))?;
                data.labels = labels;
                Ok(GitHubResponse::LabelsReplaced)
            }
            GitHubEffect::CreateLabel { repo, label } => {
                let fake = state.repos.get_mut(&repo).ok_or_else(|| unknown_repo(&repo))?;
                if find_label(&fake.labels, &label.name).is_some() {
                    return Err(GitHubApiError::permanent_without_source(format!(
                        "label {} already exists in {}",
                        label.name, repo
                    )));
                }
                fake.labels.push(label);
                Ok(GitHubResponse::LabelCreated)
            }
            GitHubEffect::UpdateLabel {
                repo,
                current_name,
                label,
            } => {
                let fake = state.repos.get_mut(&repo).ok_or_else(|| unknown_repo(&repo))?;
                let idx = find_label(&fake.labels, &current_name)
                    .ok_or_else(|| unknown_label(&repo, &current_name))?;
                fake.labels[idx] = label;
                Ok(GitHubResponse::LabelUpdated)
            }
            GitHubEffect::DeleteLabel { repo, name } => {
                let fake = state.repos.get_mut(&repo).ok_or_else(|| unknown_repo(&repo))?;
                let idx = find_label(&fake.labels, &name).ok_or_else(|| unknown_label(&repo, &name))?;
                fake.labels.remove(idx);
                Ok(GitHubResponse::LabelDeleted)
            }
        }
    }
}

/// GitHub label names are unique without regard to case.
fn find_label(labels: &[LabelData], name: &str) -> Option<usize> {
    labels
        .iter()
        .position(|l| l.name == name)
        .or_else(|| labels.iter().position(|l| l.name.to_lowercase() == name.to_lowercase()))
}

fn not_found(repo: &RepoId, issue: IssueNumber) -> GitHubApiError {
    GitHubApiError::permanent_without_source(format!("issue {}{} not found", repo, issue))
}

fn unknown_repo(repo: &RepoId) -> GitHubApiError {
    GitHubApiError::permanent_without_source(format!("repository {} not found", repo))
}

fn unknown_label(repo: &RepoId, name: &str) -> GitHubApiError {
    GitHubApiError::permanent_without_source(format!("label {} not found in {}", name, repo))
}

impl GitHubInterpreter for FakeGitHub {
    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, GitHubApiError>> + Send {
        let result = self.apply(effect);
        async move { result }
    }
}
