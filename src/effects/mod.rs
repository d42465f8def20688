//! Effects-as-data for GitHub operations.
//!
//! This module defines effect types that describe operations without executing them.
//! This enables:
//! - Core logic that is independent of the network
//! - Testability via fake interpreters
//! - Logging of intended operations by name and target

pub mod github;
pub mod interpreter;
pub mod requests;

pub use github::{GitHubEffect, GitHubResponse};
pub use interpreter::GitHubInterpreter;
