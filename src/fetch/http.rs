// src/fetch/http.rs
// =============================================================================
// Fetches URLs over HTTP(S) with reqwest.
//
// Key behavior:
// - Every line is validated with the `url` crate before a request is issued,
//   so garbage input fails fast with a readable message
// - Plain GET, no retries and NO timeout (a stalled server keeps its worker
//   slot until it answers)
// - The body is streamed: bytes_stream() is adapted into an AsyncBufRead so
//   the worker can read it line by line without buffering the whole page
// - Non-2xx responses are still content and get counted; the status is only
//   logged
// =============================================================================

use super::{Body, Fetch};
use crate::error::FetchError;
use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use std::io;
use url::Url;

/// The production fetcher. Cheap to share: reqwest's Client is an Arc inside
/// and pools connections across all workers.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Body, FetchError> {
        let url = Url::parse(url)?;

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %response.url(), %status, "non-success status, counting body anyway");
        }

        // into_async_read needs an Unpin stream of io::Result chunks.
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| io::Error::new(io::ErrorKind::Other, e)))
            .boxed()
            .into_async_read();

        Ok(Box::new(body))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why stream the body?
//    - response.text() would hold the whole page in memory
//    - With N workers that is N full pages at once
//    - bytes_stream() hands us chunks as they arrive from the network
//
// 2. What does into_async_read do?
//    - Turns a Stream of byte chunks into something that implements AsyncRead
//    - The result is also AsyncBufRead, so we can call read_until on it
//
// 3. Why is there no timeout?
//    - A slow server simply keeps its worker busy until it answers
//    - Every other worker keeps going in the meantime
// -----------------------------------------------------------------------------
