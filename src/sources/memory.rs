//! In-memory manifest source
//!
//! Serves canned manifest text per URL. Useful for running the service
//! offline and for exercising the loader and poller without a network.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use super::fetcher::ManifestFetcher;
use crate::errors::{FetchError, FetchResult};

/// Fetcher answering from a per-URL queue of canned responses
///
/// Each URL holds a sequence of results consumed in order; the last result
/// keeps being returned once the sequence is exhausted. Unknown URLs fail
/// with a 404 [`FetchError::Status`].
#[derive(Debug, Default)]
pub struct StaticManifestFetcher {
    responses: Mutex<HashMap<String, VecDeque<FetchResult<String>>>>,
    requests: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl StaticManifestFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answer `url` with `text`
    pub fn with(self, url: &str, text: &str) -> Self {
        self.with_sequence(url, vec![Ok(text.to_string())])
    }

    /// Answer `url` with `results` in order, repeating the last one
    pub fn with_sequence(self, url: &str, results: Vec<FetchResult<String>>) -> Self {
        lock(&self.responses).insert(url.to_string(), results.into());
        self
    }

    /// Always fail `url` with `error`
    pub fn with_error(self, url: &str, error: FetchError) -> Self {
        self.with_sequence(url, vec![Err(error)])
    }

    /// Wait `delay` before answering each request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn next_response(&self, url: &str) -> FetchResult<String> {
        let mut responses = lock(&self.responses);
        match responses.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue
                .pop_front()
                .unwrap_or_else(|| Err(FetchError::status(url, 404))),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(FetchError::status(url, 404))),
            None => Err(FetchError::status(url, 404)),
        }
    }
}

#[async_trait]
impl ManifestFetcher for StaticManifestFetcher {
    async fn fetch_text(&self, url: &str) -> FetchResult<String> {
        lock(&self.requests).push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_response(url)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
