//! Review status classification.
//!
//! Pure and deterministic: the status is derived from the issue title and the
//! comment bodies only, with a fixed precedence (first match wins):
//!
//! 1. the title contains `wip` in any case → [`StatusLabel::Wip`]
//! 2. some comment contains [`CAKE_MARKER`] → [`StatusLabel::Caked`]
//! 3. otherwise → [`StatusLabel::AwaitingCake`]
//!
//! Neither check is word-bounded. A title such as "Swipe to dismiss"
//! therefore counts as work in progress; that false positive is a known
//! limitation of the heuristic and is kept as is.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::StatusLabel;

/// The literal token a reviewer posts to approve a pull request.
///
/// Matched case-sensitively, anywhere inside a comment body.
pub const CAKE_MARKER: &str = ":cake:";

static WIP_TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)wip").unwrap());

/// Returns true if the title contains `wip` in any case.
pub fn is_wip(title: &str) -> bool {
    WIP_TITLE.is_match(title)
}

/// Returns true if any comment body contains the cake marker.
pub fn is_caked<S: AsRef<str>>(comments: &[S]) -> bool {
    comments
        .iter()
        .any(|comment| comment.as_ref().contains(CAKE_MARKER))
}

/// Derives the status label for a pull request.
///
/// ```
/// use cakebot::status::classify;
/// use cakebot::types::StatusLabel;
///
/// assert_eq!(classify("WIP: refactor", &[":cake:"]), StatusLabel::Wip);
/// assert_eq!(classify("Add feature", &["looks good", "ship it :cake:"]), StatusLabel::Caked);
/// assert_eq!(classify("Add feature", &["looks good"]), StatusLabel::AwaitingCake);
/// ```
pub fn classify<S: AsRef<str>>(title: &str, comments: &[S]) -> StatusLabel {
    if is_wip(title) {
        StatusLabel::Wip
    } else if is_caked(comments) {
        StatusLabel::Caked
    } else {
        StatusLabel::AwaitingCake
    }
}
