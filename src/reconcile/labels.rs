//! Status label reconciliation for a single review request.
//!
//! The desired label set is the target status label followed by every
//! non-status label already on the issue. A write happens only when the issue
//! lacks a status label or carries a wrong one, and it always replaces the
//! entire label set (see [`GitHubEffect::ReplaceIssueLabels`]), so replaying
//! it converges to the same state.
//!
//! [`GitHubEffect::ReplaceIssueLabels`]: crate::effects::GitHubEffect::ReplaceIssueLabels

use tracing::{debug, error, info};

use crate::effects::GitHubInterpreter;
use crate::effects::requests::replace_issue_labels;
use crate::github::GitHubApiError;
use crate::types::StatusLabel;

use super::review::ReviewRequest;

/// How the current labels relate to the target status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelChange {
    /// No status label on the issue.
    Missing,
    /// At least one status label that is not the target.
    Incorrect,
    /// Exactly the target status label is present.
    UpToDate,
}

/// The outcome of diffing an issue's labels against its target status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPlan {
    pub target: StatusLabel,
    pub change: LabelChange,
    /// The complete label set to write: the target first, then every
    /// non-status label in its current order.
    pub new_labels: Vec<String>,
}

impl LabelPlan {
    /// Returns true if the issue's labels must be rewritten.
    pub fn needs_update(&self) -> bool {
        self.change != LabelChange::UpToDate
    }
}

/// Diffs `current` labels against the `target` status.
///
/// ```
/// use cakebot::reconcile::{LabelChange, plan_labels};
/// use cakebot::types::StatusLabel;
///
/// let current = vec!["wip".to_string(), "team:x".to_string()];
/// let plan = plan_labels(&current, StatusLabel::Caked);
///
/// assert_eq!(plan.change, LabelChange::Incorrect);
/// assert_eq!(plan.new_labels, vec!["caked", "team:x"]);
/// ```
pub fn plan_labels(current: &[String], target: StatusLabel) -> LabelPlan {
    let mut new_labels = vec![target.as_str().to_string()];
    let mut found_status = false;
    let mut incorrect_status = false;

    for label in current {
        match StatusLabel::from_name(label) {
            Some(status) => {
                found_status = true;
                if status != target {
                    incorrect_status = true;
                }
            }
            None => new_labels.push(label.clone()),
        }
    }

    let change = if !found_status {
        LabelChange::Missing
    } else if incorrect_status {
        LabelChange::Incorrect
    } else {
        LabelChange::UpToDate
    };

    LabelPlan {
        target,
        change,
        new_labels,
    }
}

/// What a reconciliation pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The labels were replaced with `labels`.
    Updated { labels: Vec<String> },
    /// The status label was already correct; nothing was written.
    Unchanged,
}

/// Brings one review request's status label in line with its classification.
///
/// Issues at most one write. A failed write is logged and returned, never
/// retried here.
pub async fn reconcile_review<G: GitHubInterpreter>(
    client: &G,
    review: &ReviewRequest,
) -> Result<ReconcileOutcome, GitHubApiError> {
    let repo = review.repo();
    let issue = review.number();
    let old_labels = review.labels();
    let plan = plan_labels(old_labels, review.status());

    let cards = review.trello_card_urls();
    if !cards.is_empty() {
        debug!(repo = %repo, issue = %issue, cards = ?cards, "Review links Trello cards");
    }

    match plan.change {
        LabelChange::Missing => info!(
            repo = %repo,
            issue = %issue,
            url = review.url(),
            old_labels = ?old_labels,
            new_labels = ?plan.new_labels,
            "Could not find review label"
        ),
        LabelChange::Incorrect => info!(
            repo = %repo,
            issue = %issue,
            url = review.url(),
            old_labels = ?old_labels,
            new_labels = ?plan.new_labels,
            "Review label is incorrect"
        ),
        LabelChange::UpToDate => {
            info!(
                repo = %repo,
                issue = %issue,
                labels = ?old_labels,
                "Review label does not need updating"
            );
            return Ok(ReconcileOutcome::Unchanged);
        }
    }

    match replace_issue_labels(client, repo, issue, plan.new_labels.clone()).await {
        Ok(()) => Ok(ReconcileOutcome::Updated {
            labels: plan.new_labels,
        }),
        Err(e) => {
            error!(
                repo = %repo,
                issue = %issue,
                error = %e,
                transient = e.is_transient(),
                "Unable to update issue review label"
            );
            Err(e)
        }
    }
}
