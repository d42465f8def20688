//! GitHub API client and effect interpreter.
//!
//! This module provides the implementation for executing GitHub effects via the octocrab
//! library. It implements the `GitHubInterpreter` trait defined in the effects module.
//!
//! Key features:
//! - Cursor pagination driven by the `Link` response header
//! - Full-replace label writes on issues
//! - Path-encoded label routes for names with spaces or colons
//! - Transient vs permanent error categorisation for logs

mod client;
mod error;
mod interpreter;
pub(crate) mod models;

pub use client::{GITHUB_API, OctocrabClient};
pub use error::{GitHubApiError, GitHubErrorKind};
pub use interpreter::interpret_github_effect;
