//! Cursor-following page walker.
//!
//! The walker is agnostic of what a page contains and how it is fetched: the
//! caller supplies a `fetch` closure that turns an optional cursor into a
//! [`Page`]. The first call receives `None` (the initial request); each later
//! call receives the cursor the previous page advertised.

use std::collections::HashSet;
use std::future::Future;

use tracing::warn;

use super::{Page, PageCursor};

/// Walks every page, handing each page's items to `visit` as soon as it arrives.
///
/// Returns the number of pages fetched. The first fetch error aborts the walk;
/// items of pages already visited stay visited.
///
/// A page that advertises a cursor already fetched in this walk ends it, so a
/// server whose links cycle cannot loop the walker forever.
pub async fn for_each_page<T, E, F, Fut, V>(mut fetch: F, mut visit: V) -> Result<usize, E>
where
    F: FnMut(Option<PageCursor>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
    V: FnMut(Vec<T>),
{
    let mut cursor: Option<PageCursor> = None;
    let mut seen: HashSet<PageCursor> = HashSet::new();
    let mut pages = 0;

    loop {
        let page = fetch(cursor.clone()).await?;
        pages += 1;
        visit(page.items);

        match page.next {
            None => return Ok(pages),
            Some(next) if seen.contains(&next) => {
                warn!(cursor = %next, pages, "Page links back to a fetched page; stopping pagination");
                return Ok(pages);
            }
            Some(next) => {
                seen.insert(next.clone());
                cursor = Some(next);
            }
        }
    }
}

/// Walks every page and returns all items in server order.
pub async fn walk_pages<T, E, F, Fut>(fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<PageCursor>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut all = Vec::new();
    for_each_page(fetch, |items| all.extend(items)).await?;
    Ok(all)
}
