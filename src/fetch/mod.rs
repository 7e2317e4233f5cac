// src/fetch/mod.rs
// =============================================================================
// This module knows how to turn a URL into readable content.
//
// Submodules:
// - http: the real implementation, backed by reqwest
//
// The engine never talks to reqwest directly. It only sees the `Fetch` trait,
// which hands back a buffered async reader over the response body. Dropping
// that reader releases the underlying connection, so whoever owns the body
// decides exactly when the network resource goes away.
// =============================================================================

mod http;

use crate::error::FetchError;
use async_trait::async_trait;
use futures::io::AsyncBufRead;

pub use http::HttpFetcher;

/// A response body, consumed line by line.
pub type Body = Box<dyn AsyncBufRead + Send + Unpin>;

/// Retrieves the content behind a URL.
///
/// Implementations must be shareable across worker tasks (`Send + Sync`);
/// the engine holds them as `Arc<dyn Fetch>`.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Body, FetchError>;
}

// -----------------------------------------------------------------------------
// Test double shared by the engine tests.
//
// Serves canned pages, can fail chosen URLs (before or in the middle of the
// body), can delay chosen URLs, and keeps a live-count high-water mark so
// tests can check the concurrency bound.
// -----------------------------------------------------------------------------
#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use futures::TryStreamExt;
    use std::collections::HashMap;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug, Clone)]
    enum Page {
        Content(String),
        Fail,
        // Yields the partial content, then the stream errors.
        Broken(String),
    }

    #[derive(Debug, Default)]
    pub(crate) struct StubFetcher {
        pages: HashMap<String, Page>,
        delays: HashMap<String, Duration>,
        live: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn page(mut self, url: &str, content: &str) -> Self {
            self.pages.insert(url.to_string(), Page::Content(content.to_string()));
            self
        }

        pub(crate) fn failing(mut self, url: &str) -> Self {
            self.pages.insert(url.to_string(), Page::Fail);
            self
        }

        pub(crate) fn broken(mut self, url: &str, partial: &str) -> Self {
            self.pages.insert(url.to_string(), Page::Broken(partial.to_string()));
            self
        }

        pub(crate) fn delay(mut self, url: &str, delay: Duration) -> Self {
            self.delays.insert(url.to_string(), delay);
            self
        }

        /// Highest number of fetches that were in progress at the same time.
        pub(crate) fn peak(&self) -> usize {
            self.peak.load(Ordering::SeqCst)
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<Body, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(live, Ordering::SeqCst);

            if let Some(delay) = self.delays.get(url) {
                tokio::time::sleep(*delay).await;
            } else {
                tokio::task::yield_now().await;
            }

            self.live.fetch_sub(1, Ordering::SeqCst);

            match self.pages.get(url) {
                Some(Page::Content(content)) => {
                    Ok(Box::new(futures::io::Cursor::new(content.clone().into_bytes())))
                }
                Some(Page::Broken(partial)) => {
                    let chunks = vec![
                        Ok(partial.clone().into_bytes()),
                        Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")),
                    ];
                    Ok(Box::new(futures::stream::iter(chunks).into_async_read()))
                }
                Some(Page::Fail) | None => Err(FetchError::Io(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))),
            }
        }
    }
}
