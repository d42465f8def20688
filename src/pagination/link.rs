//! `Link` header parsing.
//!
//! GitHub paginates list endpoints with an RFC 8288 style header:
//!
//! ```text
//! Link: <https://api.github.com/orgs/o/issues?page=2>; rel="next", <...?page=9>; rel="last"
//! ```
//!
//! Only the `rel="next"` entry matters here. Entries that do not look like
//! `<url>; params...` are skipped rather than treated as errors: a broken
//! entry must not abort an otherwise usable listing.

use super::PageCursor;

/// Extracts the next-page URL from a `Link` header value.
///
/// Returns `None` when no well-formed entry carries `rel="next"`, which the
/// walker treats as "this was the last page".
///
/// ```
/// use cakebot::pagination::next_page_url;
///
/// let header = r#"<https://api.github.com/x?page=2>; rel="next", <https://api.github.com/x?page=5>; rel="last""#;
/// assert_eq!(
///     next_page_url(header).map(|c| c.into_string()),
///     Some("https://api.github.com/x?page=2".to_string())
/// );
/// assert_eq!(next_page_url(r#"<https://api.github.com/x?page=1>; rel="prev""#), None);
/// ```
pub fn next_page_url(header: &str) -> Option<PageCursor> {
    for link in header.split(',') {
        let segments: Vec<&str> = link.trim().split(';').collect();

        // An entry needs at least a target and a rel
        if segments.len() < 2 {
            continue;
        }

        let target = segments[0].trim();
        let Some(url) = target
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
        else {
            continue;
        };

        if segments[1..]
            .iter()
            .any(|segment| segment.contains(r#"rel="next""#))
        {
            return Some(PageCursor::new(url));
        }
    }

    None
}
