//! Media (leaf) playlist parsing
//!
//! Sums segment durations and decides whether the playlist is VOD or a
//! live, still-growing window.

use tracing::trace;

use super::tags;
use crate::models::MediaPlaylistSummary;

const PLAYLIST_TYPE_VOD: &str = "VOD";

/// Parse media playlist text into its total duration and VOD status
///
/// Unparsable `#EXTINF` durations are skipped. The playlist is VOD when it
/// carries `#EXT-X-ENDLIST` anywhere or declares `#EXT-X-PLAYLIST-TYPE:VOD`.
pub fn parse_media_playlist(text: &str) -> MediaPlaylistSummary {
    let mut total_length = 0.0_f64;
    let mut segment_count = 0;
    let mut playlist_type: Option<&str> = None;
    let mut end_list = false;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(value) = line.strip_prefix(tags::PLAYLIST_TYPE) {
            playlist_type = Some(value.trim());
        } else if let Some(raw) = line.strip_prefix(tags::EXTINF) {
            let duration = raw.split(',').next().unwrap_or_default().trim();
            match duration.parse::<f64>() {
                Ok(seconds) if seconds.is_finite() => {
                    total_length += seconds;
                    segment_count += 1;
                }
                _ => trace!("Skipping unparsable segment duration: {:?}", duration),
            }
        } else if line == tags::ENDLIST {
            end_list = true;
        }
    }

    MediaPlaylistSummary {
        total_length,
        is_vod: end_list || playlist_type == Some(PLAYLIST_TYPE_VOD),
        segment_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_invalid_duration_skipped_and_vod_type() {
        let text = r#"#EXTM3U
#EXT-X-VERSION:3

#EXT-X-PLAYLIST-TYPE:VOD
#EXTINF:bad,
seg-1.ts
#EXTINF:5.0,
seg-2.ts
"#;
        let summary = parse_media_playlist(text);

        assert_eq!(summary.total_length, 5.0);
        assert!(summary.is_vod);
        assert_eq!(summary.segment_count, 1);
    }

    #[test]
    fn test_endlist_marks_vod() {
        let text = "#EXTM3U\n#EXTINF:6.0,\nseg-1.ts\n#EXTINF:5.0,\nseg-2.ts\n#EXTINF:4.0,\nseg-3.ts\n#EXT-X-ENDLIST\n";
        let summary = parse_media_playlist(text);
        assert_eq!(summary.total_length, 15.0);
        assert!(summary.is_vod);
        assert_eq!(summary.segment_count, 3);
    }

    #[test]
    fn test_endlist_position_does_not_matter() {
        let summary = parse_media_playlist("#EXT-X-ENDLIST\n#EXTINF:2.5,title\nseg.ts\n");
        assert!(summary.is_vod);
        assert_eq!(summary.total_length, 2.5);
    }

    #[test]
    fn test_live_and_event_playlists_are_not_vod() {
        let live = parse_media_playlist("#EXTM3U\n#EXTINF:6.0,\nseg-1.ts\n");
        assert!(!live.is_vod);
        assert_eq!(live.total_length, 6.0);

        let event = parse_media_playlist("#EXT-X-PLAYLIST-TYPE:EVENT\n#EXTINF:6,\ns.ts\n");
        assert!(!event.is_vod);
    }

    #[test]
    fn test_playlist_type_last_wins_and_is_case_sensitive() {
        assert!(!parse_media_playlist("#EXT-X-PLAYLIST-TYPE:VOD\n#EXT-X-PLAYLIST-TYPE:EVENT\n").is_vod);
        assert!(parse_media_playlist("#EXT-X-PLAYLIST-TYPE: VOD \n").is_vod);
        assert!(!parse_media_playlist("#EXT-X-PLAYLIST-TYPE:vod\n").is_vod);
    }

    #[test]
    fn test_duration_without_comma_and_non_finite() {
        let summary = parse_media_playlist("#EXTINF:3\na.ts\n#EXTINF:NaN,\nb.ts\n#EXTINF:inf,\nc.ts\n");
        assert_eq!(summary.total_length, 3.0);
        assert_eq!(summary.segment_count, 1);
    }

    #[test]
    fn test_empty_text() {
        let summary = parse_media_playlist("");
        assert_eq!(summary.total_length, 0.0);
        assert!(!summary.is_vod);
    }

    proptest! {
        #[test]
        fn prop_never_panics(text in "(#EXT[-A-Z]*:?[ -~]*\n|[ -~]*\n){0,20}") {
            let summary = parse_media_playlist(&text);
            let extinf_lines = text.lines().filter(|l| l.trim().starts_with("#EXTINF:")).count();
            prop_assert!(summary.segment_count <= extinf_lines);
            if summary.segment_count == 0 {
                prop_assert_eq!(summary.total_length, 0.0);
            }
        }

        #[test]
        fn prop_sums_well_formed_durations(durations in proptest::collection::vec(0u32..100_000, 0..30)) {
            let mut text = String::from("#EXTM3U\n");
            for (i, millis) in durations.iter().enumerate() {
                text.push_str(&format!("#EXTINF:{}.{:03},\nseg-{i}.ts\n", millis / 1000, millis % 1000));
            }
            let summary = parse_media_playlist(&text);
            let expected: f64 = durations.iter().map(|m| *m as f64 / 1000.0).sum();
            prop_assert!((summary.total_length - expected).abs() < 1e-6);
            prop_assert_eq!(summary.segment_count, durations.len());
            prop_assert!(!summary.is_vod);
        }
    }
}
