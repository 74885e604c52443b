use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::live_poller::LivePoller;
use super::metadata_loader::load_stream_metadata;
use super::playback::PlaybackController;
use crate::config::StreamConfig;
use crate::models::{MediaPlaylistSummary, StreamMetadata};
use crate::sources::ManifestFetcher;
use crate::utils::url::UrlUtils;

pub type SharedStreamState = Arc<RwLock<StreamState>>;

/// The current stream and everything reported about it
#[derive(Debug, Clone, PartialEq)]
pub struct StreamState {
    /// Master playlist URL; empty once the stream has been cleared
    pub hls_url: String,
    pub metadata: StreamMetadata,
    pub playback: PlaybackController,
    /// Whether a live poller is refreshing `metadata`
    pub live_polling: bool,
}

/// Point-in-time copy of [`StreamState`] handed to callers
pub type StreamSnapshot = StreamState;

impl StreamState {
    pub fn new(hls_url: impl Into<String>, metadata: StreamMetadata) -> Self {
        Self {
            hls_url: hls_url.into(),
            metadata,
            playback: PlaybackController::default(),
            live_polling: false,
        }
    }

    /// Apply a refreshed media playlist from the poller of `media_url`
    ///
    /// Returns `false` without touching anything if the state has since moved
    /// to another media playlist.
    pub fn apply_live_update(&mut self, media_url: &str, summary: &MediaPlaylistSummary) -> bool {
        if self.metadata.media_url.as_deref() != Some(media_url) {
            return false;
        }
        self.metadata.total_length = summary.total_length;
        self.metadata.is_vod = summary.is_vod;
        if summary.is_vod {
            self.live_polling = false;
        }
        true
    }
}

/// Owner of the current stream and its live poller
///
/// Cloning is cheap and every clone refers to the same stream. Stream
/// changes (`set_stream`, `clear_stream`, `shutdown`) are serialized through
/// the poller slot, so a previous poller has always exited before the next
/// change is applied. Readers never wait on network I/O.
#[derive(Clone)]
pub struct StreamStateManager {
    state: SharedStreamState,
    poller: Arc<Mutex<Option<LivePoller>>>,
    fetcher: Arc<dyn ManifestFetcher>,
    poll_interval: Duration,
}

impl StreamStateManager {
    pub fn new(fetcher: Arc<dyn ManifestFetcher>, config: &StreamConfig) -> Self {
        let initial = StreamState::new(
            config.default_hls_url.clone(),
            StreamMetadata::placeholder(config.default_total_length),
        );
        Self {
            state: Arc::new(RwLock::new(initial)),
            poller: Arc::new(Mutex::new(None)),
            fetcher,
            poll_interval: config.poll_interval,
        }
    }

    /// Load `url` and make it the current stream
    ///
    /// A fetch failure does not fail the call: the URL is still recorded,
    /// with empty metadata and no poller. Live streams get a new poller.
    ///
    /// The change runs on its own task, so dropping the returned future
    /// (e.g. a client disconnecting mid-load) does not abandon it halfway.
    pub async fn set_stream(&self, url: &str) -> StreamSnapshot {
        let manager = self.clone();
        let url = url.to_string();
        self.finish_change(tokio::spawn(async move { manager.apply_set_stream(&url).await }))
            .await
    }

    /// Forget the current stream and stop playback
    ///
    /// Runs on its own task, like [`StreamStateManager::set_stream`].
    pub async fn clear_stream(&self) -> StreamSnapshot {
        let manager = self.clone();
        self.finish_change(tokio::spawn(async move { manager.apply_clear_stream().await }))
            .await
    }

    async fn finish_change(&self, task: JoinHandle<StreamSnapshot>) -> StreamSnapshot {
        match task.await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Stream change task did not complete: {}", e);
                self.snapshot().await
            }
        }
    }

    async fn apply_set_stream(&self, url: &str) -> StreamSnapshot {
        let mut slot = self.poller.lock().await;
        self.stop_poller(&mut slot).await;

        let display_url = UrlUtils::obfuscate_credentials(url);
        info!("Loading stream {}", display_url);

        let metadata = match load_stream_metadata(self.fetcher.as_ref(), url).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Failed to load stream {}: {}", display_url, e);
                StreamMetadata::fallback()
            }
        };

        let poll_url = match (&metadata.media_url, metadata.is_vod) {
            (Some(media_url), false) => Some(media_url.clone()),
            _ => None,
        };

        let snapshot = {
            let mut state = self.state.write().await;
            state.hls_url = url.to_string();
            state.metadata = metadata;
            state.live_polling = poll_url.is_some();
            state.clone()
        };

        if let Some(media_url) = poll_url {
            *slot = Some(LivePoller::spawn(
                self.fetcher.clone(),
                media_url,
                self.state.clone(),
                self.poll_interval,
            ));
        }

        snapshot
    }

    async fn apply_clear_stream(&self) -> StreamSnapshot {
        let mut slot = self.poller.lock().await;
        self.stop_poller(&mut slot).await;

        let mut state = self.state.write().await;
        state.hls_url.clear();
        state.metadata = StreamMetadata::fallback();
        state.live_polling = false;
        state.playback.stop();
        debug!("Stream cleared");
        state.clone()
    }

    pub async fn snapshot(&self) -> StreamSnapshot {
        self.state.read().await.clone()
    }

    /// Apply a playback change and return the resulting state
    ///
    /// `change` receives the controller and the current total length.
    pub async fn update_playback<F>(&self, change: F) -> StreamSnapshot
    where
        F: FnOnce(&mut PlaybackController, f64),
    {
        let mut state = self.state.write().await;
        let total_length = state.metadata.total_length;
        change(&mut state.playback, total_length);
        state.clone()
    }

    /// Stop any live poller; used when the server shuts down
    pub async fn shutdown(&self) {
        let mut slot = self.poller.lock().await;
        self.stop_poller(&mut slot).await;
    }

    /// Whether a live poller is currently running
    ///
    /// Waits for any in-flight stream change to finish.
    pub async fn has_active_poller(&self) -> bool {
        self.poller
            .lock()
            .await
            .as_ref()
            .is_some_and(|poller| !poller.is_finished())
    }

    async fn stop_poller(&self, slot: &mut Option<LivePoller>) {
        if let Some(poller) = slot.take() {
            let outcome = poller.cancel().await;
            debug!("Previous live poller stopped: {:?}", outcome);
            self.state.write().await.live_polling = false;
        }
    }
}
