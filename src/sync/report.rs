//! Bulk sync outcome counters.

use std::fmt;

/// What one bulk sync did.
///
/// Counts units, not API calls. A unit that failed is counted once no matter
/// how far it got.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Repositories whose label provisioning ran to completion.
    pub repos_provisioned: usize,
    /// Repositories whose label provisioning failed part way.
    pub repos_failed: usize,
    /// Organization issues listed, before filtering.
    pub issues_seen: usize,
    /// Listed issues without pull request linkage.
    pub plain_issues_skipped: usize,
    /// Listed pull request issues whose repository could not be determined.
    pub unattributed_issues_skipped: usize,
    /// Reviews whose labels were rewritten.
    pub reviews_updated: usize,
    /// Reviews that already carried the right status label.
    pub reviews_unchanged: usize,
    /// Reviews whose comment walk or label write failed.
    pub reviews_failed: usize,
    /// Repository or issue listings that stopped early on an error.
    pub listing_failures: usize,
}

impl SyncReport {
    /// Total failed units and listings.
    pub fn failures(&self) -> usize {
        self.repos_failed + self.reviews_failed + self.listing_failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} repos provisioned ({} failed), {} issues seen, {} reviews updated, {} unchanged, {} failed",
            self.repos_provisioned,
            self.repos_failed,
            self.issues_seen,
            self.reviews_updated,
            self.reviews_unchanged,
            self.reviews_failed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_sum_every_failure_kind() {
        let report = SyncReport {
            repos_failed: 1,
            reviews_failed: 2,
            listing_failures: 1,
            reviews_updated: 5,
            ..Default::default()
        };
        assert_eq!(report.failures(), 4);
        assert!(!report.is_clean());
        assert!(SyncReport::default().is_clean());
    }

    #[test]
    fn display_summarises_counts() {
        let report = SyncReport {
            repos_provisioned: 3,
            issues_seen: 10,
            reviews_updated: 2,
            reviews_unchanged: 4,
            ..Default::default()
        };
        assert_eq!(
            report.to_string(),
            "3 repos provisioned (0 failed), 10 issues seen, 2 reviews updated, 4 unchanged, 0 failed"
        );
    }
}
