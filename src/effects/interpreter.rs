//! Effect interpreter trait.
//!
//! The trait-based design keeps reconciliation, provisioning and bulk sync
//! independent of the network: production code runs them against
//! `OctocrabClient`, tests against an in-memory fake that records effects.

use std::future::Future;

use super::github::{GitHubEffect, GitHubResponse};
use crate::github::GitHubApiError;

/// Interprets GitHub effects against the GitHub API.
///
/// Implementations are shared between concurrently running sync units, so
/// they are expected to be cheap to clone (octocrab clients are reference
/// counted internally).
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct StaticGitHub {
///     responses: HashMap<GitHubEffect, GitHubResponse>,
/// }
///
/// impl GitHubInterpreter for StaticGitHub {
///     async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, GitHubApiError> {
///         self.responses.get(&effect).cloned().ok_or_else(|| {
///             GitHubApiError::permanent_without_source(format!("unexpected effect: {}", effect))
///         })
///     }
/// }
/// ```
pub trait GitHubInterpreter {
    /// Execute a GitHub effect and return its response.
    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, GitHubApiError>> + Send;
}
