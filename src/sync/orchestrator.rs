//! Bulk synchronisation of an entire organization.
//!
//! Two streams run concurrently: label provisioning (one unit per repository)
//! and review reconciliation (one unit per pull request issue). Units are
//! spawned onto a [`JoinSet`] page by page as the listings arrive, and a shared
//! [`Semaphore`] bounds how many units run at once across both streams.
//!
//! Units never cancel each other. A failed unit is logged and counted; a failed
//! listing stops spawning for its stream, but every unit already spawned is
//! still awaited before [`BulkSync::run`] returns.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::effects::GitHubInterpreter;
use crate::effects::requests::{org_issues_page, org_repos_page};
use crate::github::GitHubApiError;
use crate::pagination::for_each_page;
use crate::reconcile::{
    ProvisionReport, ReconcileOutcome, ReviewRequest, provision_repo_labels, reconcile_review,
};
use crate::types::{IssueData, IssueNumber, RepoId};

use super::report::SyncReport;

/// Default number of units in flight.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Tuning for a bulk sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Upper bound on concurrently running units. Zero is treated as one.
    pub max_concurrency: usize,
    /// Whether to provision the label taxonomy in every repository.
    pub provision_labels: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            provision_labels: true,
        }
    }
}

/// A one-shot sync of every repository and pull request in an organization.
#[derive(Debug, Clone)]
pub struct BulkSync<G> {
    client: G,
    org: String,
    options: SyncOptions,
}

type ProvisionResult = (RepoId, Result<ProvisionReport, GitHubApiError>);
type ReviewResult = (RepoId, IssueNumber, Result<ReconcileOutcome, GitHubApiError>);

fn semaphore_closed() -> GitHubApiError {
    GitHubApiError::permanent_without_source("concurrency limiter closed unexpectedly")
}

impl<G> BulkSync<G>
where
    G: GitHubInterpreter + Clone + Send + Sync + 'static,
{
    pub fn new(client: G, org: impl Into<String>, options: SyncOptions) -> Self {
        BulkSync {
            client,
            org: org.into(),
            options,
        }
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    /// Runs provisioning and reconciliation to completion.
    ///
    /// There is no timeout and no cancellation: this returns only once every
    /// spawned unit has finished.
    pub async fn run(&self) -> SyncReport {
        let limit = self.options.max_concurrency.max(1);
        let semaphore = Arc::new(Semaphore::new(limit));
        info!(org = %self.org, max_concurrency = limit, "Starting bulk sync");

        let (provisioning, reviews) = tokio::join!(
            self.provision_all(Arc::clone(&semaphore)),
            self.reconcile_all(semaphore),
        );

        let report = SyncReport {
            repos_provisioned: provisioning.repos_provisioned,
            repos_failed: provisioning.repos_failed,
            listing_failures: provisioning.listing_failures + reviews.listing_failures,
            ..reviews
        };
        info!(org = %self.org, report = %report, failures = report.failures(), "Bulk sync finished");
        report
    }

    async fn provision_all(&self, semaphore: Arc<Semaphore>) -> SyncReport {
        let mut report = SyncReport::default();
        if !self.options.provision_labels {
            info!(org = %self.org, "Label provisioning disabled");
            return report;
        }

        let mut units: JoinSet<ProvisionResult> = JoinSet::new();
        let listing = for_each_page(
            |cursor| org_repos_page(&self.client, &self.org, cursor),
            |repos| {
                for repo in repos {
                    let client = self.client.clone();
                    let semaphore = Arc::clone(&semaphore);
                    units.spawn(async move {
                        let _permit = match semaphore.acquire().await {
                            Ok(permit) => permit,
                            Err(_) => return (repo, Err(semaphore_closed())),
                        };
                        let result = provision_repo_labels(&client, &repo).await;
                        (repo, result)
                    });
                }
            },
        )
        .await;

        if let Err(e) = listing {
            error!(org = %self.org, error = %e, "Unable to list organization repositories");
            report.listing_failures += 1;
        }

        while let Some(joined) = units.join_next().await {
            match joined {
                Ok((repo, Ok(provisioned))) => {
                    debug!(repo = %repo, actions = provisioned.actions.len(), "Repository labels provisioned");
                    report.repos_provisioned += 1;
                }
                Ok((repo, Err(e))) => {
                    warn!(repo = %repo, error = %e, "Repository label provisioning failed");
                    report.repos_failed += 1;
                }
                Err(join_error) => {
                    error!(error = %join_error, "Provisioning task panicked");
                    report.repos_failed += 1;
                }
            }
        }

        report
    }

    async fn reconcile_all(&self, semaphore: Arc<Semaphore>) -> SyncReport {
        let mut report = SyncReport::default();
        let mut units: JoinSet<ReviewResult> = JoinSet::new();

        let listing = for_each_page(
            |cursor| org_issues_page(&self.client, &self.org, cursor),
            |issues| {
                for issue in issues {
                    report.issues_seen += 1;
                    let Some(repo) = self.review_target(&issue, &mut report) else {
                        continue;
                    };
                    let client = self.client.clone();
                    let semaphore = Arc::clone(&semaphore);
                    units.spawn(async move {
                        let number = issue.number;
                        let _permit = match semaphore.acquire().await {
                            Ok(permit) => permit,
                            Err(_) => return (repo, number, Err(semaphore_closed())),
                        };
                        let result = reconcile_issue(&client, repo.clone(), issue).await;
                        (repo, number, result)
                    });
                }
            },
        )
        .await;

        if let Err(e) = listing {
            error!(org = %self.org, error = %e, "Unable to list organization issues");
            report.listing_failures += 1;
        }

        while let Some(joined) = units.join_next().await {
            match joined {
                Ok((_, _, Ok(ReconcileOutcome::Updated { .. }))) => report.reviews_updated += 1,
                Ok((_, _, Ok(ReconcileOutcome::Unchanged))) => report.reviews_unchanged += 1,
                Ok((repo, issue, Err(e))) => {
                    warn!(repo = %repo, issue = %issue, error = %e, "Review reconciliation failed");
                    report.reviews_failed += 1;
                }
                Err(join_error) => {
                    error!(error = %join_error, "Reconciliation task panicked");
                    report.reviews_failed += 1;
                }
            }
        }

        report
    }

    /// The repository to reconcile `issue` in, or `None` if it is skipped.
    fn review_target(&self, issue: &IssueData, report: &mut SyncReport) -> Option<RepoId> {
        if !issue.is_pull_request {
            debug!(issue = %issue.number, url = %issue.html_url, "Skipping issue without pull request");
            report.plain_issues_skipped += 1;
            return None;
        }
        match &issue.repo {
            Some(repo) => Some(repo.clone()),
            None => {
                warn!(issue = %issue.number, url = %issue.html_url, "Skipping pull request with unknown repository");
                report.unattributed_issues_skipped += 1;
                None
            }
        }
    }
}

/// Loads the full comment history of one pull request and reconciles it.
async fn reconcile_issue<G: GitHubInterpreter>(
    client: &G,
    repo: RepoId,
    issue: IssueData,
) -> Result<ReconcileOutcome, GitHubApiError> {
    let review = ReviewRequest::load(client, repo, issue).await?;
    reconcile_review(client, &review).await
}
