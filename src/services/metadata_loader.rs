//! Stream metadata loading
//!
//! Fetches a master playlist, picks the highest-bandwidth variant and reads
//! that variant's media playlist for duration and VOD status. A manifest
//! without variants is treated as the media playlist itself.

use tracing::{debug, info};

use crate::errors::FetchResult;
use crate::hls::{parse_master_playlist, parse_media_playlist};
use crate::models::StreamMetadata;
use crate::sources::ManifestFetcher;
use crate::utils::url::UrlUtils;

/// Load the full metadata bundle for `url`
///
/// Propagates the first [`crate::errors::FetchError`]; parsing itself never
/// fails.
pub async fn load_stream_metadata(
    fetcher: &dyn ManifestFetcher,
    url: &str,
) -> FetchResult<StreamMetadata> {
    let master_text = fetcher.fetch_text(url).await?;
    let master = parse_master_playlist(&master_text, url);
    debug!(
        "Master playlist {} lists {} variants and {} audio tracks",
        UrlUtils::obfuscate_credentials(url),
        master.variants.len(),
        master.audio_tracks.len()
    );

    let media_url = match master.highest_bandwidth_variant() {
        Some(variant) => {
            info!(
                "Selected variant {} (bandwidth: {:?}, resolution: {:?})",
                UrlUtils::obfuscate_credentials(&variant.uri),
                variant.bandwidth,
                variant.resolution
            );
            variant.uri.clone()
        }
        None => url.to_string(),
    };

    let media_text = fetcher.fetch_text(&media_url).await?;
    let summary = parse_media_playlist(&media_text);
    info!(
        "Media playlist has {} segments, {:.3}s total, vod={}",
        summary.segment_count, summary.total_length, summary.is_vod
    );

    Ok(StreamMetadata {
        variants: master.variants,
        audio_tracks: master.audio_tracks,
        total_length: summary.total_length,
        is_vod: summary.is_vod,
        media_url: Some(media_url),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchError;
    use crate::sources::StaticManifestFetcher;

    const MASTER_URL: &str = "https://example.com/test/stream.m3u8";

    const MASTER: &str = r#"#EXTM3U
#EXT-X-VERSION:3
#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID="audio",NAME="English",LANGUAGE="en",URI="audio/eng.m3u8",DEFAULT=YES
#EXT-X-STREAM-INF:BANDWIDTH=800000,RESOLUTION=640x360
low/playlist.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=2000000,RESOLUTION=1280x720
mid/playlist.m3u8
"#;

    const MEDIA_VOD: &str = "#EXTM3U\n#EXTINF:6.0,\nseg-1.ts\n#EXTINF:5.0,\nseg-2.ts\n#EXTINF:4.0,\nseg-3.ts\n#EXT-X-ENDLIST\n";

    #[tokio::test]
    async fn test_loads_highest_bandwidth_variant() {
        let fetcher = StaticManifestFetcher::new()
            .with(MASTER_URL, MASTER)
            .with("https://example.com/test/mid/playlist.m3u8", MEDIA_VOD)
            .with("https://example.com/test/low/playlist.m3u8", "#EXTINF:1,\n");

        let meta = load_stream_metadata(&fetcher, MASTER_URL).await.unwrap();

        assert_eq!(meta.total_length, 15.0);
        assert!(meta.is_vod);
        assert_eq!(meta.variants.len(), 2);
        assert_eq!(meta.variants[0].bandwidth, Some(800_000));
        assert_eq!(meta.variants[1].bandwidth, Some(2_000_000));
        assert_eq!(meta.audio_tracks.len(), 1);
        assert_eq!(meta.audio_tracks[0].default, Some(true));
        assert_eq!(
            meta.media_url.as_deref(),
            Some("https://example.com/test/mid/playlist.m3u8")
        );
        assert_eq!(
            fetcher.requested(),
            vec![
                MASTER_URL.to_string(),
                "https://example.com/test/mid/playlist.m3u8".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_uses_input_url_when_no_variants() {
        let url = "https://example.com/master.m3u8";
        let fetcher = StaticManifestFetcher::new().with_sequence(
            url,
            vec![
                Ok("#EXTM3U\n#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"audio\",NAME=\"English\",LANGUAGE=\"en\",URI=\"audio/eng.m3u8\"\n".to_string()),
                Ok("#EXTM3U\n#EXTINF:10.0,\nseg-1.ts\n#EXT-X-ENDLIST\n".to_string()),
            ],
        );

        let meta = load_stream_metadata(&fetcher, url).await.unwrap();

        assert!(meta.variants.is_empty());
        assert_eq!(meta.audio_tracks.len(), 1);
        assert_eq!(meta.total_length, 10.0);
        assert!(meta.is_vod);
        assert_eq!(meta.media_url.as_deref(), Some(url));
        assert_eq!(fetcher.requested(), vec![url.to_string(), url.to_string()]);
    }

    #[tokio::test]
    async fn test_propagates_master_fetch_error() {
        let fetcher = StaticManifestFetcher::new();
        let err = load_stream_metadata(&fetcher, MASTER_URL).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_propagates_media_fetch_error() {
        let fetcher = StaticManifestFetcher::new().with(MASTER_URL, MASTER);
        let err = load_stream_metadata(&fetcher, MASTER_URL).await.unwrap_err();
        assert_eq!(err.url(), "https://example.com/test/mid/playlist.m3u8");
    }
}
