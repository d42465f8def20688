//! Core domain types for the review-status bot.

pub mod ids;
pub mod issue;
pub mod label;

pub use ids::{IssueNumber, RepoId};
pub use issue::{IssueData, LabelData};
pub use label::{LABEL_TAXONOMY, LabelSpec, StatusLabel, deprecated_label_names};
