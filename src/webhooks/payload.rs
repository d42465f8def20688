//! Webhook payload decoding and routing.
//!
//! Only `pull_request` and `issue_comment` deliveries can trigger a
//! reconciliation. Both carry a loosely shaped body; the fields the bot reads
//! are all optional, and [`route`] decides what, if anything, to reconcile.
//!
//! # Headers
//!
//! - `X-GitHub-Event` selects the [`WebhookEvent`]
//! - `X-Hub-Signature-256` is checked by the server before decoding

use serde::Deserialize;
use thiserror::Error;

use crate::github::models::{RawIssue, RawPullRequest, RawRepository};
use crate::types::{IssueData, IssueNumber, RepoId};

/// Webhook event types, from the `X-GitHub-Event` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    PullRequest,
    IssueComment,
    /// Any other event (including `ping`). Acknowledged and ignored.
    Other(String),
}

impl WebhookEvent {
    pub fn from_header(value: &str) -> Self {
        match value {
            "pull_request" => WebhookEvent::PullRequest,
            "issue_comment" => WebhookEvent::IssueComment,
            other => WebhookEvent::Other(other.to_string()),
        }
    }

    /// Whether deliveries of this type are decoded at all.
    pub fn is_handled(&self) -> bool {
        !matches!(self, WebhookEvent::Other(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            WebhookEvent::PullRequest => "pull_request",
            WebhookEvent::IssueComment => "issue_comment",
            WebhookEvent::Other(name) => name,
        }
    }
}

/// The subset of a webhook body the bot reads.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    issue: Option<RawIssue>,
    #[serde(default)]
    repository: Option<RawRepository>,
    #[serde(default)]
    pull_request: Option<RawPullRequest>,
}

/// Error type for webhook payload failures.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body is not valid JSON of the expected shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A triggering event that identifies no repository.
    #[error("payload does not identify a repository")]
    MissingRepository,
}

/// Decodes a webhook body.
///
/// ```
/// use cakebot::webhooks::decode_payload;
///
/// let payload = decode_payload(br#"{ "action": "created" }"#).unwrap();
/// assert_eq!(payload.action, "created");
///
/// assert!(decode_payload(b"not json").is_err());
/// ```
pub fn decode_payload(body: &[u8]) -> Result<WebhookPayload, PayloadError> {
    Ok(serde_json::from_slice(body)?)
}

/// What a delivery asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookAction {
    /// Nothing refers to a pull request.
    Ignore,
    /// The payload already carries the pull request's issue.
    Inspect { repo: RepoId, issue: IssueData },
    /// A pull request was opened; its issue must be fetched first.
    FetchAndInspect { repo: RepoId, number: IssueNumber },
}

/// Decides what a decoded delivery triggers.
///
/// An issue with a non-zero number and pull request linkage is inspected as
/// is. Otherwise an `opened` pull request is inspected after fetching its
/// issue. The repository comes from the payload's `repository` object, falling
/// back to the issue's own URLs.
pub fn route(payload: WebhookPayload) -> Result<WebhookAction, PayloadError> {
    let payload_repo = payload.repository.as_ref().map(RawRepository::repo_id);

    if let Some(raw) = payload.issue
        && raw.number != 0
        && raw.pull_request.is_some()
    {
        let issue = raw.into_issue_data();
        let repo = payload_repo
            .or_else(|| issue.repo.clone())
            .ok_or(PayloadError::MissingRepository)?;
        return Ok(WebhookAction::Inspect { repo, issue });
    }

    if let Some(pr) = payload.pull_request
        && payload.action == "opened"
    {
        let repo = payload_repo.ok_or(PayloadError::MissingRepository)?;
        return Ok(WebhookAction::FetchAndInspect {
            repo,
            number: IssueNumber(pr.number),
        });
    }

    Ok(WebhookAction::Ignore)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> WebhookPayload {
        serde_json::from_value(value).unwrap()
    }

    fn repository() -> serde_json::Value {
        json!({ "name": "hello", "owner": { "login": "octocat" } })
    }

    #[test]
    fn event_header_classification() {
        assert_eq!(WebhookEvent::from_header("pull_request"), WebhookEvent::PullRequest);
        assert_eq!(WebhookEvent::from_header("issue_comment"), WebhookEvent::IssueComment);
        assert!(!WebhookEvent::from_header("ping").is_handled());
        assert!(!WebhookEvent::from_header("").is_handled());
        assert_eq!(WebhookEvent::from_header("push").as_str(), "push");
    }

    #[test]
    fn comment_on_pull_request_is_inspected() {
        let payload = decode(json!({
            "action": "created",
            "issue": {
                "number": 42,
                "title": "Add feature",
                "labels": [{ "name": "wip", "color": "207de5" }],
                "pull_request": { "url": "https://api.github.com/repos/octocat/hello/pulls/42" }
            },
            "repository": repository()
        }));

        match route(payload).unwrap() {
            WebhookAction::Inspect { repo, issue } => {
                assert_eq!(repo, RepoId::new("octocat", "hello"));
                assert_eq!(issue.number, IssueNumber(42));
                assert_eq!(issue.labels, vec!["wip".to_string()]);
            }
            other => panic!("expected Inspect, got {:?}", other),
        }
    }

    #[test]
    fn comment_on_plain_issue_is_ignored() {
        let payload = decode(json!({
            "action": "created",
            "issue": { "number": 3, "title": "Bug" },
            "repository": repository()
        }));
        assert_eq!(route(payload).unwrap(), WebhookAction::Ignore);
    }

    #[test]
    fn issue_numbered_zero_is_ignored() {
        let payload = decode(json!({
            "action": "edited",
            "issue": { "pull_request": {} },
            "repository": repository()
        }));
        assert_eq!(route(payload).unwrap(), WebhookAction::Ignore);
    }

    #[test]
    fn opened_pull_request_fetches_its_issue() {
        let payload = decode(json!({
            "action": "opened",
            "pull_request": { "number": 7 },
            "repository": repository()
        }));
        assert_eq!(
            route(payload).unwrap(),
            WebhookAction::FetchAndInspect {
                repo: RepoId::new("octocat", "hello"),
                number: IssueNumber(7),
            }
        );
    }

    #[test]
    fn other_pull_request_actions_are_ignored() {
        let payload = decode(json!({
            "action": "synchronize",
            "pull_request": { "number": 7 },
            "repository": repository()
        }));
        assert_eq!(route(payload).unwrap(), WebhookAction::Ignore);
    }

    #[test]
    fn repository_falls_back_to_issue_url() {
        let payload = decode(json!({
            "issue": {
                "number": 5,
                "pull_request": {},
                "repository_url": "https://api.github.com/repos/octocat/other"
            }
        }));
        match route(payload).unwrap() {
            WebhookAction::Inspect { repo, .. } => assert_eq!(repo, RepoId::new("octocat", "other")),
            other => panic!("expected Inspect, got {:?}", other),
        }
    }

    #[test]
    fn triggering_event_without_repository_is_an_error() {
        let payload = decode(json!({
            "action": "opened",
            "pull_request": { "number": 7 }
        }));
        assert!(matches!(route(payload), Err(PayloadError::MissingRepository)));
    }

    #[test]
    fn empty_object_decodes_and_is_ignored() {
        let payload = decode_payload(b"{}").unwrap();
        assert_eq!(route(payload).unwrap(), WebhookAction::Ignore);
    }

    #[test]
    fn malformed_body_fails_to_decode() {
        assert!(matches!(decode_payload(b"{"), Err(PayloadError::Json(_))));
        assert!(decode_payload(br#"{ "issue": { "number": "x" } }"#).is_err());
    }
}
