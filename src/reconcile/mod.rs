//! Status reconciliation: per-issue label updates and per-repository label
//! provisioning.

pub mod labels;
pub mod provision;
pub mod review;

pub use labels::{LabelChange, LabelPlan, ReconcileOutcome, plan_labels, reconcile_review};
pub use provision::{LabelAction, ProvisionReport, plan_provisioning, provision_repo_labels};
pub use review::ReviewRequest;
