//! Paginated stream for lazy iteration over list responses.
//!
//! This module provides a [`PageStream`] that implements the `Stream` trait,
//! fetching one page per poll and handing each page to the caller before
//! the next request is made.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::Stream;

use super::ClientInner;
use crate::models::{Page, QueryParams};
use crate::{Error, Result};

/// Page count assumed before the first response arrives.
pub const PAGE_COUNT_SENTINEL: i64 = 2000;

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A stream that lazily fetches every page of a list resource.
///
/// The stream keeps two counters, starting at `page = 0` and
/// `pages = PAGE_COUNT_SENTINEL`. While `page < pages` it sends the same
/// request again, copies the `page` and `pages` fields of the response
/// into its counters, and yields the response.
///
/// The `page` query parameter is never rewritten: the stream relies on
/// the server to advance. A server that keeps answering with the same
/// `page` below `pages` produces an endless stream, so bound it with
/// `StreamExt::take` when the server is not trusted.
///
/// An error is yielded once and ends the stream. A response missing
/// either counter is reported as [`Error::InvalidResponse`].
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use theoneapi_rs::QueryParams;
///
/// # async fn example(client: theoneapi_rs::TheOneApiClient) -> theoneapi_rs::Result<()> {
/// let mut pages = client.paginated_get_request("/v2/movie", Some(QueryParams::new().limit(3)));
///
/// while let Some(page) = pages.next().await {
///     let page = page?;
///     println!("page {:?} of {:?}", page.page(), page.pages());
/// }
/// # Ok(())
/// # }
/// ```
pub struct PageStream {
    /// Function issuing one request.
    fetch_page: Box<dyn Fn() -> BoxFuture<'static, Result<Page>> + Send + Sync>,
    /// Last page number reported by the server.
    page: i64,
    /// Last page count reported by the server.
    pages: i64,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<Page>>>,
    /// Set after an error; the stream yields nothing more.
    failed: bool,
}

impl PageStream {
    /// Create a stream over `resource` on the given client.
    pub(crate) fn new(inner: Arc<ClientInner>, resource: &str, params: Option<QueryParams>) -> Self {
        let resource = resource.to_string();

        Self::from_fetch(move || {
            let inner = inner.clone();
            let resource = resource.clone();
            let params = params.clone();

            Box::pin(async move { inner.get_request(&resource, params.as_ref()).await })
        })
    }

    /// Create a stream from a function that fetches one page.
    pub(crate) fn from_fetch<F>(fetch_page: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<Page>> + Send + Sync + 'static,
    {
        Self {
            fetch_page: Box::new(fetch_page),
            page: 0,
            pages: PAGE_COUNT_SENTINEL,
            pending_fetch: None,
            failed: false,
        }
    }

    /// Last page number reported by the server (0 before the first page).
    pub fn current_page(&self) -> i64 {
        self.page
    }

    /// Last page count reported by the server
    /// ([`PAGE_COUNT_SENTINEL`] before the first page).
    pub fn page_count(&self) -> i64 {
        self.pages
    }

    /// Returns `true` once the stream will yield nothing more.
    pub fn is_exhausted(&self) -> bool {
        self.pending_fetch.is_none() && (self.failed || self.page >= self.pages)
    }
}

impl Stream for PageStream {
    type Item = Result<Page>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(page)) => {
                        this.pending_fetch = None;

                        let (Some(current), Some(total)) = (page.page(), page.pages()) else {
                            this.failed = true;
                            return Poll::Ready(Some(Err(Error::InvalidResponse(
                                "paginated response is missing `page` or `pages`".to_string(),
                            ))));
                        };

                        this.page = current;
                        this.pages = total;
                        tracing::debug!(page = current, pages = total, "Fetched page");

                        return Poll::Ready(Some(Ok(page)));
                    }
                    Poll::Ready(Err(e)) => {
                        this.pending_fetch = None;
                        this.failed = true; // Stop on error
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => {
                        return Poll::Pending;
                    }
                }
            }

            if this.failed || this.page >= this.pages {
                return Poll::Ready(None);
            }

            this.pending_fetch = Some((this.fetch_page)());
        }
    }
}

impl std::fmt::Debug for PageStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStream")
            .field("page", &self.page)
            .field("pages", &self.pages)
            .field("in_flight", &self.pending_fetch.is_some())
            .finish()
    }
}
