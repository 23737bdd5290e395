//! Cursor-following retrieval of paged collections.
//!
//! A [`PageSource`] knows how to fetch one page given an optional cursor.
//! [`fetch_all`] drives it until a page arrives without a cursor and
//! returns every item in page order, then in-page order.
//!
//! Pages are fetched strictly one after another: each request needs the
//! cursor from the previous response.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};

/// Items requested per page (upstream protocol maximum)
pub const MAX_RESULTS_PER_PAGE: u32 = 50;

/// One page of a paged collection
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in upstream order (possibly empty)
    pub items: Vec<T>,

    /// Continuation cursor; `None` marks the final page
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// A page with no continuation
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// A page followed by another one at `cursor`
    pub fn with_cursor(items: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(cursor.into()),
        }
    }
}

/// Something that can return one page of a collection
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// Name used in logs
    fn resource(&self) -> &str;

    /// Fetch the page at `cursor` (`None` for the first page)
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<Page<Self::Item>>;
}

/// Bounds on a single retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Maximum number of pages to request; `None` follows cursors forever
    pub max_pages: Option<u32>,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            max_pages: Some(1000),
        }
    }
}

impl PageLimits {
    /// No page bound at all
    pub fn unbounded() -> Self {
        Self { max_pages: None }
    }
}

/// Fetch every page from `source` and concatenate the items.
///
/// The first failing page aborts the retrieval and its error is returned;
/// items from earlier pages are dropped with it. Cancelling `cancel`
/// abandons the in-flight request and returns [`CatalogError::Cancelled`].
pub async fn fetch_all<S>(
    source: &S,
    limits: &PageLimits,
    cancel: &CancellationToken,
) -> Result<Vec<S::Item>>
where
    S: PageSource + ?Sized,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages: u32 = 0;

    loop {
        if let Some(limit) = limits.max_pages {
            if pages >= limit {
                warn!(
                    resource = source.resource(),
                    limit, "Upstream still returning cursors at page limit"
                );
                return Err(CatalogError::PageLimitExceeded { limit });
            }
        }

        let page = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(resource = source.resource(), pages, "Retrieval cancelled");
                return Err(CatalogError::Cancelled);
            }
            page = source.fetch_page(cursor.as_deref()) => page?,
        };
        pages += 1;

        debug!(
            resource = source.resource(),
            page = pages,
            items = page.items.len(),
            has_more = page.next_cursor.is_some(),
            "Fetched page"
        );

        items.extend(page.items);

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!(
        resource = source.resource(),
        pages,
        total = items.len(),
        "Retrieval complete"
    );

    Ok(items)
}
