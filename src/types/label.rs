//! The review-status label taxonomy.
//!
//! Three mutually exclusive status labels track the review progress of a pull
//! request. Their names and colours are fixed; repositories are provisioned to
//! match them and issues carry at most one of them after reconciliation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status of a pull request, as expressed by its status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusLabel {
    /// The title marks the pull request as work in progress.
    Wip,
    /// A reviewer has approved with the cake marker.
    Caked,
    /// Ready for review, no approval yet.
    AwaitingCake,
}

impl StatusLabel {
    /// All status labels, in taxonomy order.
    pub const ALL: [StatusLabel; 3] = [
        StatusLabel::Wip,
        StatusLabel::Caked,
        StatusLabel::AwaitingCake,
    ];

    /// The label name as it appears on GitHub.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Wip => "wip",
            StatusLabel::Caked => "caked",
            StatusLabel::AwaitingCake => "awaiting-cake",
        }
    }

    /// Parses an exact (case-sensitive) label name.
    pub fn from_name(name: &str) -> Option<Self> {
        StatusLabel::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Returns true if `name` is exactly one of the status label names.
    pub fn is_status_label(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// The canonical definition of this label.
    pub fn spec(&self) -> &'static LabelSpec {
        match self {
            StatusLabel::Wip => &LABEL_TAXONOMY[0],
            StatusLabel::Caked => &LABEL_TAXONOMY[1],
            StatusLabel::AwaitingCake => &LABEL_TAXONOMY[2],
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical definition of a repository label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSpec {
    /// Canonical, case-sensitive name.
    pub name: &'static str,
    /// Six-digit hex colour without the leading `#`.
    pub color: &'static str,
    /// Former names of this label. Matching labels are deleted during provisioning.
    pub deprecated_aliases: &'static [&'static str],
}

/// The label taxonomy every repository is provisioned with.
pub const LABEL_TAXONOMY: [LabelSpec; 3] = [
    LabelSpec {
        name: "wip",
        // Blue
        color: "207de5",
        deprecated_aliases: &[],
    },
    LabelSpec {
        name: "caked",
        // Green
        color: "009800",
        deprecated_aliases: &[],
    },
    LabelSpec {
        name: "awaiting-cake",
        // Orange
        color: "eb6420",
        deprecated_aliases: &["Awaiting Cake"],
    },
];

/// Every deprecated label name across the taxonomy.
pub fn deprecated_label_names() -> impl Iterator<Item = &'static str> {
    LABEL_TAXONOMY
        .iter()
        .flat_map(|spec| spec.deprecated_aliases.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_names_match_status_names() {
        for status in StatusLabel::ALL {
            assert_eq!(status.spec().name, status.as_str());
        }
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert_eq!(StatusLabel::from_name("wip"), Some(StatusLabel::Wip));
        assert_eq!(StatusLabel::from_name("caked"), Some(StatusLabel::Caked));
        assert_eq!(
            StatusLabel::from_name("awaiting-cake"),
            Some(StatusLabel::AwaitingCake)
        );
        assert_eq!(StatusLabel::from_name("WIP"), None);
        assert_eq!(StatusLabel::from_name("Awaiting Cake"), None);
    }

    #[test]
    fn colors_are_six_hex_digits() {
        for spec in &LABEL_TAXONOMY {
            assert_eq!(spec.color.len(), 6, "{}", spec.name);
            assert!(spec.color.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn deprecated_names_are_never_canonical() {
        for name in deprecated_label_names() {
            assert!(!StatusLabel::is_status_label(name));
        }
        assert_eq!(deprecated_label_names().collect::<Vec<_>>(), vec!["Awaiting Cake"]);
    }

    #[test]
    fn serde_uses_label_names() {
        assert_eq!(
            serde_json::to_string(&StatusLabel::AwaitingCake).unwrap(),
            "\"awaiting-cake\""
        );
    }
}
