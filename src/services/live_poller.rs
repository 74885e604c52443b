//! Background refresh of live media playlists
//!
//! A live stream's duration grows as segments are appended, so while the
//! current stream is not VOD a poller re-fetches its media playlist on a
//! fixed interval and writes the new duration into the shared stream state.
//! Polling stops on its own once the playlist turns into VOD (an
//! `#EXT-X-ENDLIST` appears), or when the owning [`LivePoller`] is cancelled.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

use super::stream_state::SharedStreamState;
use crate::hls::parse_media_playlist;
use crate::sources::ManifestFetcher;
use crate::utils::url::UrlUtils;

/// How a poll task ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The playlist became VOD
    Completed,
    /// Stopped through the cancellation token
    Cancelled,
}

/// Handle to a running poll task
///
/// Dropping the handle cancels the task. Use [`LivePoller::cancel`] to also
/// wait for it to exit.
#[derive(Debug)]
pub struct LivePoller {
    media_url: String,
    handle: JoinHandle<PollOutcome>,
    cancel_guard: DropGuard,
}

impl LivePoller {
    /// Start polling `media_url` every `interval`
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        fetcher: Arc<dyn ManifestFetcher>,
        media_url: String,
        stream: SharedStreamState,
        interval: Duration,
    ) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();
        let task_url = media_url.clone();
        let handle = tokio::spawn(async move {
            poll_media_playlist(fetcher.as_ref(), &task_url, &stream, interval, &task_token).await
        });

        info!(
            "Started live polling of {} every {:?}",
            UrlUtils::obfuscate_credentials(&media_url),
            interval
        );

        Self {
            media_url,
            handle,
            cancel_guard: token.drop_guard(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the task and wait for it to exit
    ///
    /// Returns [`PollOutcome::Completed`] if the task had already finished on
    /// its own before the cancellation was observed.
    pub async fn cancel(self) -> PollOutcome {
        let Self {
            media_url,
            handle,
            cancel_guard,
        } = self;
        drop(cancel_guard);

        let outcome = Self::join_handle(handle).await;
        debug!(
            "Live poller for {} exited: {:?}",
            UrlUtils::obfuscate_credentials(&media_url),
            outcome
        );
        outcome
    }

    async fn join_handle(handle: JoinHandle<PollOutcome>) -> PollOutcome {
        match handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Live poller task did not exit cleanly: {}", e);
                PollOutcome::Cancelled
            }
        }
    }
}

/// Poll `media_url` until it becomes VOD or `token` is cancelled
///
/// Fetch failures are logged and retried after `interval`. Each successful
/// fetch replaces the stream's `total_length` and `is_vod` under a single
/// write guard, provided the shared state still refers to `media_url`.
pub async fn poll_media_playlist(
    fetcher: &dyn ManifestFetcher,
    media_url: &str,
    stream: &SharedStreamState,
    interval: Duration,
    token: &CancellationToken,
) -> PollOutcome {
    let display_url = UrlUtils::obfuscate_credentials(media_url);
    let mut iteration: u64 = 0;

    loop {
        iteration += 1;

        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = fetcher.fetch_text(media_url) => result,
        };

        match fetched {
            Ok(text) => {
                if token.is_cancelled() {
                    break;
                }
                let summary = parse_media_playlist(&text);
                debug!(
                    "Poll #{} of {}: {} segments, {:.3}s, vod={}",
                    iteration, display_url, summary.segment_count, summary.total_length, summary.is_vod
                );

                let applied = stream.write().await.apply_live_update(media_url, &summary);
                if !applied {
                    info!("Stream changed under live poller for {}, stopping", display_url);
                    return PollOutcome::Cancelled;
                }

                if summary.is_vod {
                    info!(
                        "Live stream {} ended after {} polls ({:.3}s total)",
                        display_url, iteration, summary.total_length
                    );
                    return PollOutcome::Completed;
                }
            }
            Err(e) => {
                warn!("Live poll #{} of {} failed: {}", iteration, display_url, e);
            }
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    info!("Live polling of {} cancelled", display_url);
    PollOutcome::Cancelled
}
