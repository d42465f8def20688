//! Webhook endpoint handler.
//!
//! Reconciles the one pull request a delivery refers to, inline on the request
//! task. GitHub is answered 200 once the labels are right (or nothing needed
//! doing) and 501 when the delivery could not be processed.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::effects::GitHubInterpreter;
use crate::effects::requests::get_issue;
use crate::github::GitHubApiError;
use crate::reconcile::{ReviewRequest, reconcile_review};
use crate::webhooks::{
    PayloadError, WebhookAction, WebhookEvent, decode_payload, route, verify_signature,
};

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Missing or invalid signature while a secret is configured.
    #[error("invalid signature")]
    InvalidSignature,

    /// Undecodable body, or a triggering event without a repository.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Fetching the issue behind an opened pull request failed.
    #[error("unable to load issue: {0}")]
    IssueFetch(#[source] GitHubApiError),

    /// Loading comments or writing labels failed.
    #[error("unable to reconcile review: {0}")]
    Reconcile(#[source] GitHubApiError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::Payload(_)
            | WebhookError::IssueFetch(_)
            | WebhookError::Reconcile(_) => StatusCode::NOT_IMPLEMENTED,
        };

        (status, self.to_string()).into_response()
    }
}

/// Webhook handler.
///
/// # Response
///
/// - 200 OK: reconciled, or nothing to do (including unhandled event types)
/// - 401 Unauthorized: bad signature, only when a secret is configured
/// - 501 Not Implemented: undecodable payload, unknown repository, or a
///   failed GitHub call
pub async fn webhook_handler<G>(
    State(app_state): State<AppState<G>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookError>
where
    G: GitHubInterpreter + Send + Sync + 'static,
{
    if let Some(secret) = app_state.webhook_secret() {
        let signature = header(&headers, HEADER_SIGNATURE).unwrap_or_default();
        if !verify_signature(&body, signature, secret) {
            warn!("Invalid webhook signature");
            return Err(WebhookError::InvalidSignature);
        }
    }

    let event = WebhookEvent::from_header(header(&headers, HEADER_EVENT).unwrap_or_default());
    if !event.is_handled() {
        info!(github_event = event.as_str(), "Not handling webhook");
        return Ok((StatusCode::OK, "OK"));
    }

    let payload = decode_payload(&body).inspect_err(|e| {
        error!(github_event = event.as_str(), error = %e, "Could not decode webhook payload");
    })?;
    let action = payload.action.clone();

    let (repo, issue) = match route(payload)? {
        WebhookAction::Ignore => {
            info!(
                github_event = event.as_str(),
                action = %action,
                "Payload does not refer to pull request"
            );
            return Ok((StatusCode::OK, "OK"));
        }
        WebhookAction::Inspect { repo, issue } => {
            info!(repo = %repo, issue = %issue.number, action = %action, "Found issue with pull request links");
            (repo, issue)
        }
        WebhookAction::FetchAndInspect { repo, number } => {
            info!(repo = %repo, issue = %number, "Found pull request opened event, inferring issue");
            let issue = get_issue(app_state.client(), &repo, number)
                .await
                .map_err(|e| {
                    error!(repo = %repo, issue = %number, error = %e, "Encountered error while loading issue");
                    WebhookError::IssueFetch(e)
                })?;
            (repo, issue)
        }
    };

    let client = app_state.client();
    let review = ReviewRequest::load(client, repo, issue)
        .await
        .map_err(WebhookError::Reconcile)?;
    let outcome = reconcile_review(client, &review)
        .await
        .map_err(WebhookError::Reconcile)?;

    debug!(repo = %review.repo(), issue = %review.number(), outcome = ?outcome, "Webhook reconciled");
    Ok((StatusCode::OK, "OK"))
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
