//! Domain models shared by the manifest parsers, the stream state and the
//! web layer.

use serde::{Deserialize, Serialize};

/// One selectable rendition listed by `#EXT-X-STREAM-INF`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub bandwidth: Option<u64>,
    /// Raw `RESOLUTION` attribute, e.g. `1280x720`; not validated
    pub resolution: Option<String>,
    /// Absolute URI of the variant's media playlist
    pub uri: String,
}

/// Alternate audio rendition listed by `#EXT-X-MEDIA:TYPE=AUDIO`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTrack {
    pub name: Option<String>,
    pub language: Option<String>,
    pub group_id: Option<String>,
    pub uri: Option<String>,
    /// `None` when the manifest has no `DEFAULT` attribute
    pub default: Option<bool>,
}

/// Everything learned about a stream from its master and media playlists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamMetadata {
    pub variants: Vec<Variant>,
    pub audio_tracks: Vec<AudioTrack>,
    /// Sum of `#EXTINF` durations in seconds
    pub total_length: f64,
    pub is_vod: bool,
    /// Media playlist the duration was taken from
    pub media_url: Option<String>,
}

impl StreamMetadata {
    /// Metadata for a stream whose manifests could not be loaded
    pub fn fallback() -> Self {
        Self {
            variants: Vec::new(),
            audio_tracks: Vec::new(),
            total_length: 0.0,
            is_vod: true,
            media_url: None,
        }
    }

    /// Metadata before any manifest has been loaded
    pub fn placeholder(total_length: f64) -> Self {
        Self {
            total_length,
            ..Self::fallback()
        }
    }
}

/// Result of parsing a media (leaf) playlist
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaPlaylistSummary {
    pub total_length: f64,
    pub is_vod: bool,
    /// Number of `#EXTINF` entries that contributed to `total_length`
    pub segment_count: usize,
}

/// Playback state reported to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
    Stopped,
}

impl PlaybackState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_track_serializes_missing_fields_as_null() {
        let track = AudioTrack {
            name: Some("English".to_string()),
            language: None,
            group_id: None,
            uri: None,
            default: None,
        };
        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["name"], "English");
        assert!(json["default"].is_null());
        assert!(json["language"].is_null());
    }

    #[test]
    fn playback_state_uses_lowercase_names() {
        assert_eq!(
            serde_json::to_value(PlaybackState::Stopped).unwrap(),
            serde_json::json!("stopped")
        );
        assert_eq!(PlaybackState::Paused.to_string(), "paused");
    }

    #[test]
    fn placeholder_keeps_duration_and_is_vod() {
        let meta = StreamMetadata::placeholder(5400.0);
        assert_eq!(meta.total_length, 5400.0);
        assert!(meta.is_vod);
        assert!(meta.variants.is_empty());
        assert!(meta.media_url.is_none());
    }
}
