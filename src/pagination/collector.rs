//! Paginated collector
//!
//! Drives a cursor-paginated source to exhaustion. The first call is made
//! once; every follow-up page goes through the retry policy. Items are kept
//! in exactly the order the server returned them.

use super::types::{Page, RequestOptions};
use crate::cancel::CancelSignal;
use crate::config::{ClientConfig, DEFAULT_PAGE_SIZE};
use crate::error::Result;
use crate::retry::RetryPolicy;
use async_trait::async_trait;
use tracing::debug;

/// A single-page endpoint call
///
/// Implementors perform one round trip for the given options and return the
/// decoded page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Item type carried by each page
    type Item: Send;

    /// Fetch one page
    async fn fetch_page(&self, options: RequestOptions) -> Result<Page<Self::Item>>;
}

/// Collects every item of a paginated source
#[derive(Debug, Clone)]
pub struct Collector {
    retry: RetryPolicy,
    page_size: u32,
    cancel: CancelSignal,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    /// Collector with the default retry policy and page size
    pub fn new() -> Self {
        Self {
            retry: RetryPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            cancel: CancelSignal::never(),
        }
    }

    /// Collector configured from a client config
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            retry: RetryPolicy::from(&config.retry),
            page_size: config.page_size,
            cancel: CancelSignal::never(),
        }
    }

    /// Set the retry policy for follow-up pages
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set the page size hint
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Observe a cancellation signal
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// The retry policy in use
    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// The page size hint in use
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Collect every item from every page
    pub async fn collect<S>(&self, source: &S) -> Result<Vec<S::Item>>
    where
        S: PageSource + ?Sized,
    {
        self.collect_while(source, |_| true).await
    }

    /// Collect items until `predicate` rejects one
    ///
    /// The first page is taken whole. On later pages, the first rejected
    /// item ends the collection successfully; it and everything after it are
    /// dropped and no further pages are requested.
    pub async fn collect_while<S, P>(&self, source: &S, mut predicate: P) -> Result<Vec<S::Item>>
    where
        S: PageSource + ?Sized,
        P: FnMut(&S::Item) -> bool + Send,
    {
        let first = self
            .cancel
            .guard(source.fetch_page(RequestOptions::first(self.page_size)))
            .await?;
        debug!("Fetched first page: {} item(s)", first.results.len());

        let mut items = first.results;
        let mut next_cursor = first.next_cursor;
        let mut pages = 1u32;

        while let Some(cursor) = next_cursor.take() {
            let options = RequestOptions::after(cursor, self.page_size);
            let page = self
                .retry
                .run(&self.cancel, || source.fetch_page(options.clone()))
                .await?;
            pages += 1;
            debug!("Fetched page {}: {} item(s)", pages, page.results.len());

            next_cursor = page.next_cursor;

            for item in page.results {
                if !predicate(&item) {
                    debug!(
                        "Predicate cutoff on page {}, stopping with {} item(s)",
                        pages,
                        items.len()
                    );
                    return Ok(items);
                }
                items.push(item);
            }
        }

        debug!("Collected {} item(s) from {} page(s)", items.len(), pages);
        Ok(items)
    }
}
