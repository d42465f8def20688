//! Repository label provisioning.
//!
//! Brings a repository's label definitions in line with [`LABEL_TAXONOMY`]:
//! deprecated names are deleted, canonical labels with the wrong colour or
//! casing are updated, and missing ones are created. Each action is its own
//! API call; the first failure stops the rest and nothing is rolled back.

use tracing::{debug, info, warn};

use crate::effects::GitHubInterpreter;
use crate::effects::requests::{create_label, delete_label, list_repo_labels, update_label};
use crate::github::GitHubApiError;
use crate::types::{LABEL_TAXONOMY, LabelData, LabelSpec, RepoId, deprecated_label_names};

/// One label write needed to provision a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelAction {
    /// Remove a deprecated label.
    Delete { name: String },
    /// Add a canonical label the repository lacks.
    Create { label: LabelData },
    /// Rewrite an existing label (found under `current_name`) to its
    /// canonical name and colour.
    Update { current_name: String, label: LabelData },
}

impl LabelAction {
    async fn apply<G: GitHubInterpreter>(
        &self,
        client: &G,
        repo: &RepoId,
    ) -> Result<(), GitHubApiError> {
        match self {
            LabelAction::Delete { name } => delete_label(client, repo, name.clone()).await,
            LabelAction::Create { label } => create_label(client, repo, label.clone()).await,
            LabelAction::Update {
                current_name,
                label,
            } => update_label(client, repo, current_name.clone(), label.clone()).await,
        }
    }
}

fn canonical(spec: &LabelSpec) -> LabelData {
    LabelData::new(spec.name, spec.color)
}

fn same_name_ignoring_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Computes the label writes that bring `current` in line with the taxonomy.
///
/// Deletions come first, then one entry per canonical label in taxonomy order.
/// An exact-name match wins over a differently-cased one. Colours compare
/// without regard to hex digit case.
pub fn plan_provisioning(current: &[LabelData]) -> Vec<LabelAction> {
    let mut actions = Vec::new();
    let mut remaining = Vec::with_capacity(current.len());

    for label in current {
        if deprecated_label_names().any(|alias| same_name_ignoring_case(alias, &label.name)) {
            actions.push(LabelAction::Delete {
                name: label.name.clone(),
            });
        } else {
            remaining.push(label);
        }
    }

    for spec in &LABEL_TAXONOMY {
        let exact = remaining.iter().find(|l| l.name == spec.name);
        let action = match exact {
            Some(label) if label.color.eq_ignore_ascii_case(spec.color) => None,
            Some(label) => Some(LabelAction::Update {
                current_name: label.name.clone(),
                label: canonical(spec),
            }),
            None => match remaining
                .iter()
                .find(|l| same_name_ignoring_case(&l.name, spec.name))
            {
                Some(label) => Some(LabelAction::Update {
                    current_name: label.name.clone(),
                    label: canonical(spec),
                }),
                None => Some(LabelAction::Create {
                    label: canonical(spec),
                }),
            },
        };
        actions.extend(action);
    }

    actions
}

/// The writes one provisioning run performed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub actions: Vec<LabelAction>,
}

impl ProvisionReport {
    pub fn is_noop(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Provisions the status label taxonomy in one repository.
///
/// Reads the current labels fresh on every call. On error the actions applied
/// so far stay applied.
pub async fn provision_repo_labels<G: GitHubInterpreter>(
    client: &G,
    repo: &RepoId,
) -> Result<ProvisionReport, GitHubApiError> {
    let current = list_repo_labels(client, repo).await?;
    let actions = plan_provisioning(&current);

    if actions.is_empty() {
        debug!(repo = %repo, labels = current.len(), "Labels already provisioned");
        return Ok(ProvisionReport::default());
    }

    for action in &actions {
        info!(repo = %repo, action = ?action, "Provisioning label");
        if let Err(e) = action.apply(client, repo).await {
            warn!(
                repo = %repo,
                action = ?action,
                error = %e,
                "Label provisioning aborted"
            );
            return Err(e);
        }
    }

    Ok(ProvisionReport { actions })
}
