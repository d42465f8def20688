//! Link-header pagination.
//!
//! GitHub list endpoints return at most one page per request and advertise the
//! next page in the `Link` response header. This module provides the cursor
//! type, the header parser, and a generic walker that follows cursors until
//! the collection is exhausted.

use serde::{Deserialize, Serialize};
use std::fmt;

mod link;
mod walker;

pub use link::next_page_url;
pub use walker::{for_each_page, walk_pages};

/// An opaque next-page token: the absolute URL of the next page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(url: impl Into<String>) -> Self {
        PageCursor(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of a remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order.
    pub items: Vec<T>,
    /// Cursor of the following page; `None` on the last page.
    pub next: Option<PageCursor>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next: Option<PageCursor>) -> Self {
        Page { items, next }
    }

    /// A page with no successor.
    pub fn last(items: Vec<T>) -> Self {
        Page { items, next: None }
    }
}
