//! GitHub API error types.
//!
//! Errors are categorised as transient or permanent. Nothing is retried
//! in-process; the category is logged so an operator can tell a flaky API
//! (the next sync pass or webhook delivery will converge) from a
//! misconfiguration that needs attention (bad token, missing permission).

use std::fmt;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The kind of GitHub API error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitHubErrorKind {
    /// Transient error - likely to succeed on a later attempt.
    ///
    /// Examples:
    /// - HTTP 5xx (server errors)
    /// - HTTP 429 (rate limited)
    /// - HTTP 403 with a rate limit message
    /// - Network timeouts
    Transient,

    /// Permanent error - requires human intervention.
    ///
    /// Examples:
    /// - HTTP 4xx (except rate limits)
    /// - Authentication failures (401, 403 non-rate-limit)
    /// - Undecodable response bodies
    Permanent,
}

impl GitHubErrorKind {
    /// Returns true if a later attempt may succeed without intervention.
    pub fn is_transient(&self) -> bool {
        matches!(self, GitHubErrorKind::Transient)
    }
}

impl fmt::Display for GitHubErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitHubErrorKind::Transient => f.write_str("transient"),
            GitHubErrorKind::Permanent => f.write_str("permanent"),
        }
    }
}

/// A GitHub API error with its category.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    /// Transient or permanent.
    pub kind: GitHubErrorKind,

    /// The HTTP status code, if available.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying error (octocrab, JSON decoding), if any.
    #[source]
    pub source: Option<BoxError>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GitHubApiError {
    /// Creates a permanent error without an underlying source.
    pub fn permanent_without_source(message: impl Into<String>) -> Self {
        Self {
            kind: GitHubErrorKind::Permanent,
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transient error without an underlying source.
    pub fn transient_without_source(message: impl Into<String>) -> Self {
        Self {
            kind: GitHubErrorKind::Transient,
            status_code: None,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a permanent error for a response body that did not decode.
    pub fn decode(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            kind: GitHubErrorKind::Permanent,
            status_code: None,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if a later attempt may succeed without intervention.
    pub fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }

    /// Categorizes an octocrab error.
    ///
    /// The categorization is based on the HTTP status code when GitHub
    /// answered, and on the error message for transport-level failures.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let status_code = Self::extract_status_code(&err);
        let message = err.to_string();

        let kind = match status_code {
            Some(429) => GitHubErrorKind::Transient,
            Some(403) if is_rate_limit_error(&message) => GitHubErrorKind::Transient,
            Some(code) if (500..600).contains(&code) => GitHubErrorKind::Transient,
            Some(_) => GitHubErrorKind::Permanent,
            None if is_network_error(&message) => GitHubErrorKind::Transient,
            None => GitHubErrorKind::Permanent,
        };

        Self {
            kind,
            status_code,
            message,
            source: Some(Box::new(err)),
        }
    }

    /// Extracts the HTTP status code from an octocrab error, if present.
    ///
    /// API errors carry the status directly. Other variants only mention it
    /// in their message, so those fall back to matching well-known codes in
    /// the rendered text; `None` leads to conservative categorisation.
    fn extract_status_code(err: &octocrab::Error) -> Option<u16> {
        if let octocrab::Error::GitHub { source, .. } = err {
            return Some(source.status_code.as_u16());
        }

        status_code_from_message(&err.to_string())
    }
}

/// Finds a well-known HTTP status code in an error message.
fn status_code_from_message(message: &str) -> Option<u16> {
    if let Some(idx) = message.find("status: ") {
        let digits: String = message[idx + 8..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if let Ok(code) = digits.parse() {
            return Some(code);
        }
    }

    let lower = message.to_lowercase();
    if message.contains("404") && lower.contains("not found") {
        return Some(404);
    }

    [422, 403, 401, 429, 500, 502, 503]
        .into_iter()
        .find(|code| message.contains(&code.to_string()))
}

/// Checks if an error message indicates a rate limit.
fn is_rate_limit_error(message: &str) -> bool {
    let message_lower = message.to_lowercase();
    message_lower.contains("rate limit")
        || message_lower.contains("api rate")
        || message_lower.contains("secondary rate")
        || message_lower.contains("abuse detection")
}

/// Checks if an error message indicates a network-level error.
fn is_network_error(message: &str) -> bool {
    let message_lower = message.to_lowercase();
    message_lower.contains("timeout")
        || message_lower.contains("connection")
        || message_lower.contains("network")
        || message_lower.contains("dns")
        || message_lower.contains("timed out")
}
