//! Dry run of a bulk sync against a real organization.
//!
//! Lists every repository and pull request of the organization, then prints
//! the label provisioning actions and status label changes a real sync would
//! make. Only read calls are issued.
//!
//! # Usage
//!
//! 1. Set `GITHUB_ACCESS_TOKEN` to a token that can read the organization's
//!    repositories and issues.
//!
//! 2. Run: `cargo run --example dry_run -- <org>`

use std::env;

use cakebot::effects::requests::{list_repo_labels, org_issues_page, org_repos_page};
use cakebot::github::OctocrabClient;
use cakebot::pagination::walk_pages;
use cakebot::reconcile::{ReviewRequest, plan_labels, plan_provisioning};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,cakebot=info".into()),
        )
        .init();

    let token = env::var("GITHUB_ACCESS_TOKEN")
        .map_err(|_| anyhow::anyhow!("GITHUB_ACCESS_TOKEN environment variable not set"))?;
    let org = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: dry_run <org>"))?;

    let client = OctocrabClient::from_token(token)?;

    println!("=== Label provisioning ===");
    let repos = walk_pages(|cursor| org_repos_page(&client, &org, cursor)).await?;
    for repo in &repos {
        let labels = list_repo_labels(&client, repo).await?;
        let actions = plan_provisioning(&labels);
        if actions.is_empty() {
            println!("{}: up to date", repo);
        }
        for action in actions {
            println!("{}: {:?}", repo, action);
        }
    }

    println!();
    println!("=== Review labels ===");
    let issues = walk_pages(|cursor| org_issues_page(&client, &org, cursor)).await?;
    let mut changes = 0;
    for issue in issues.into_iter().filter(|i| i.is_pull_request) {
        let Some(repo) = issue.repo.clone() else {
            println!("{}: repository unknown, skipped", issue.html_url);
            continue;
        };

        let review = match ReviewRequest::load(&client, repo, issue).await {
            Ok(review) => review,
            Err(e) => {
                println!("comment walk failed: {}", e);
                continue;
            }
        };

        let plan = plan_labels(review.labels(), review.status());
        if plan.needs_update() {
            changes += 1;
            println!(
                "{}{} {:?} -> {:?} ({})",
                review.repo(),
                review.number(),
                review.labels(),
                plan.new_labels,
                review.title()
            );
        }
    }

    println!();
    println!("{} repositories, {} review label changes", repos.len(), changes);
    Ok(())
}
