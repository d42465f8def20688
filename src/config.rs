//! Process configuration: command-line flags with environment fallbacks.

use clap::Parser;
use thiserror::Error;

use crate::sync::{DEFAULT_MAX_CONCURRENCY, SyncOptions};

/// Environment variable holding the GitHub access token.
pub const TOKEN_ENV: &str = "GITHUB_ACCESS_TOKEN";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "cakebot=info";

/// Keeps review status labels on an organization's pull requests.
#[derive(Debug, Clone, Parser)]
#[command(name = "cakebot")]
#[command(about = "Keeps review status labels on an organization's pull requests")]
#[command(version)]
pub struct Config {
    /// Port for the webhook server (0 disables the server)
    #[arg(long, env = "PORT", default_value_t = 0)]
    pub port: u16,

    /// GitHub organization whose repositories are synced
    #[arg(long = "github-org", env = "GITHUB_ORG")]
    pub github_org: String,

    /// Maximum number of repositories or pull requests processed at once
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY, value_parser = parse_concurrency)]
    pub max_concurrency: usize,

    /// Do not create, update or delete repository labels during the bulk sync
    #[arg(long)]
    pub skip_provisioning: bool,

    /// Shared secret for verifying webhook signatures
    #[arg(long, env = "GITHUB_WEBHOOK_SECRET", hide_env_values = true)]
    pub webhook_secret: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GITHUB_ACCESS_TOKEN is not set")]
    MissingToken,
}

fn parse_concurrency(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Config {
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            max_concurrency: self.max_concurrency,
            provision_labels: !self.skip_provisioning,
        }
    }

    /// The webhook secret as bytes, ignoring an empty value.
    pub fn webhook_secret_bytes(&self) -> Option<Vec<u8>> {
        self.webhook_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_bytes().to_vec())
    }
}

/// Reads the GitHub token from the environment.
pub fn github_token() -> Result<String, ConfigError> {
    token_from(std::env::var(TOKEN_ENV).ok())
}

fn token_from(value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ConfigError::MissingToken),
    }
}
