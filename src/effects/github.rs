//! GitHub API effect types.
//!
//! These types describe GitHub API operations as data, without executing them.
//! The reconciler, provisioner and bulk sync build effects; an interpreter
//! (octocrab in production, an in-memory fake in tests) executes them.
//!
//! Unlike a per-repository client, the bot works across a whole organization,
//! so every repository-scoped effect names its repository.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pagination::{Page, PageCursor};
use crate::types::{IssueData, IssueNumber, LabelData, RepoId};

/// A GitHub API effect.
///
/// List effects fetch a single page: `cursor: None` requests the first page,
/// later pages are requested with the cursor the previous response returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GitHubEffect {
    // ─── Queries ──────────────────────────────────────────────────────────────
    /// List the repositories of an organization.
    ListOrgRepos {
        org: String,
        cursor: Option<PageCursor>,
    },

    /// List every issue and pull request of an organization visible to the token,
    /// most recently updated first.
    ListOrgIssues {
        org: String,
        cursor: Option<PageCursor>,
    },

    /// List the comments on an issue.
    ListIssueComments {
        repo: RepoId,
        issue: IssueNumber,
        cursor: Option<PageCursor>,
    },

    /// List the label definitions of a repository.
    ListRepoLabels {
        repo: RepoId,
        cursor: Option<PageCursor>,
    },

    /// Fetch a single issue by number.
    GetIssue { repo: RepoId, issue: IssueNumber },

    // ─── Mutations ────────────────────────────────────────────────────────────
    /// Replace the complete label set of an issue.
    ///
    /// This overwrites every label on the issue, so `labels` must be the full
    /// desired set. Replaying it is harmless, which is what makes retries by
    /// the next sync pass or webhook safe.
    ReplaceIssueLabels {
        repo: RepoId,
        issue: IssueNumber,
        labels: Vec<String>,
    },

    /// Create a label definition in a repository.
    CreateLabel { repo: RepoId, label: LabelData },

    /// Rename and/or recolour an existing label definition.
    UpdateLabel {
        repo: RepoId,
        /// The label's name as it currently exists in the repository.
        current_name: String,
        label: LabelData,
    },

    /// Delete a label definition from a repository.
    DeleteLabel { repo: RepoId, name: String },
}

impl GitHubEffect {
    /// Returns true for effects that change remote state.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            GitHubEffect::ReplaceIssueLabels { .. }
                | GitHubEffect::CreateLabel { .. }
                | GitHubEffect::UpdateLabel { .. }
                | GitHubEffect::DeleteLabel { .. }
        )
    }

    /// Short operation name for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            GitHubEffect::ListOrgRepos { .. } => "list_org_repos",
            GitHubEffect::ListOrgIssues { .. } => "list_org_issues",
            GitHubEffect::ListIssueComments { .. } => "list_issue_comments",
            GitHubEffect::ListRepoLabels { .. } => "list_repo_labels",
            GitHubEffect::GetIssue { .. } => "get_issue",
            GitHubEffect::ReplaceIssueLabels { .. } => "replace_issue_labels",
            GitHubEffect::CreateLabel { .. } => "create_label",
            GitHubEffect::UpdateLabel { .. } => "update_label",
            GitHubEffect::DeleteLabel { .. } => "delete_label",
        }
    }
}

impl fmt::Display for GitHubEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitHubEffect::ListOrgRepos { org, .. } | GitHubEffect::ListOrgIssues { org, .. } => {
                write!(f, "{} {}", self.name(), org)
            }
            GitHubEffect::ListIssueComments { repo, issue, .. }
            | GitHubEffect::GetIssue { repo, issue }
            | GitHubEffect::ReplaceIssueLabels { repo, issue, .. } => {
                write!(f, "{} {}{}", self.name(), repo, issue)
            }
            GitHubEffect::ListRepoLabels { repo, .. } => write!(f, "{} {}", self.name(), repo),
            GitHubEffect::CreateLabel { repo, label } => {
                write!(f, "{} {} {}", self.name(), repo, label.name)
            }
            GitHubEffect::UpdateLabel {
                repo, current_name, ..
            } => write!(f, "{} {} {}", self.name(), repo, current_name),
            GitHubEffect::DeleteLabel { repo, name } => {
                write!(f, "{} {} {}", self.name(), repo, name)
            }
        }
    }
}

// ─── Response Types ───────────────────────────────────────────────────────────

/// Response from a GitHub effect.
///
/// Each variant corresponds to the response from a particular effect type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GitHubResponse {
    /// Response to `ListOrgRepos`.
    Repos(Page<RepoId>),

    /// Response to `ListOrgIssues`.
    Issues(Page<IssueData>),

    /// Response to `ListIssueComments`: comment bodies in creation order.
    Comments(Page<String>),

    /// Response to `ListRepoLabels`.
    Labels(Page<LabelData>),

    /// Response to `GetIssue`.
    Issue(IssueData),

    /// Response to `ReplaceIssueLabels`.
    LabelsReplaced,

    /// Response to `CreateLabel`.
    LabelCreated,

    /// Response to `UpdateLabel`.
    LabelUpdated,

    /// Response to `DeleteLabel`.
    LabelDeleted,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> RepoId {
        RepoId::new("octocat", "hello")
    }

    #[test]
    fn only_mutations_are_writes() {
        let reads = [
            GitHubEffect::ListOrgRepos {
                org: "o".into(),
                cursor: None,
            },
            GitHubEffect::ListOrgIssues {
                org: "o".into(),
                cursor: None,
            },
            GitHubEffect::ListIssueComments {
                repo: repo(),
                issue: IssueNumber(1),
                cursor: None,
            },
            GitHubEffect::ListRepoLabels {
                repo: repo(),
                cursor: None,
            },
            GitHubEffect::GetIssue {
                repo: repo(),
                issue: IssueNumber(1),
            },
        ];
        assert!(reads.iter().all(|e| !e.is_write()));

        let writes = [
            GitHubEffect::ReplaceIssueLabels {
                repo: repo(),
                issue: IssueNumber(1),
                labels: vec![],
            },
            GitHubEffect::CreateLabel {
                repo: repo(),
                label: LabelData::new("wip", "207de5"),
            },
            GitHubEffect::UpdateLabel {
                repo: repo(),
                current_name: "WIP".into(),
                label: LabelData::new("wip", "207de5"),
            },
            GitHubEffect::DeleteLabel {
                repo: repo(),
                name: "Awaiting Cake".into(),
            },
        ];
        assert!(writes.iter().all(GitHubEffect::is_write));
    }

    #[test]
    fn display_names_the_target() {
        let effect = GitHubEffect::ReplaceIssueLabels {
            repo: repo(),
            issue: IssueNumber(42),
            labels: vec!["caked".into()],
        };
        assert_eq!(effect.to_string(), "replace_issue_labels octocat/hello#42");

        let effect = GitHubEffect::DeleteLabel {
            repo: repo(),
            name: "Awaiting Cake".into(),
        };
        assert_eq!(effect.to_string(), "delete_label octocat/hello Awaiting Cake");
    }

    #[test]
    fn effects_serialize_with_type_tag() {
        let effect = GitHubEffect::GetIssue {
            repo: repo(),
            issue: IssueNumber(7),
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["type"], "get_issue");
        assert_eq!(json["issue"], 7);
    }
}
