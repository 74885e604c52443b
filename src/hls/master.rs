//! Master playlist parsing
//!
//! Extracts the variant streams and audio renditions a master manifest
//! advertises. Relative URIs are resolved against the manifest's URL.

use tracing::trace;

use super::attributes::{parse_attribute_list, AttributeList};
use super::tags;
use crate::models::{AudioTrack, Variant};
use crate::utils::url::UrlUtils;

/// Variants and audio tracks of a master playlist, in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterPlaylist {
    pub variants: Vec<Variant>,
    pub audio_tracks: Vec<AudioTrack>,
}

impl MasterPlaylist {
    /// Variant with the highest `BANDWIDTH`
    ///
    /// A missing bandwidth counts as 0. On ties the first variant in
    /// manifest order wins.
    pub fn highest_bandwidth_variant(&self) -> Option<&Variant> {
        let mut best: Option<&Variant> = None;
        for variant in &self.variants {
            let bandwidth = variant.bandwidth.unwrap_or(0);
            match best {
                Some(current) if bandwidth <= current.bandwidth.unwrap_or(0) => {}
                _ => best = Some(variant),
            }
        }
        best
    }
}

/// Parse master playlist text, resolving URIs against `base_url`
///
/// Malformed input never fails: a stream-info tag with no following URI
/// line is dropped, non-audio media tags are skipped, and unknown tags are
/// ignored.
pub fn parse_master_playlist(text: &str, base_url: &str) -> MasterPlaylist {
    let mut playlist = MasterPlaylist::default();
    let mut pending_stream_info: Option<AttributeList> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(raw) = line.strip_prefix(tags::STREAM_INF) {
            if pending_stream_info.is_some() {
                trace!("Discarding stream info without a URI line");
            }
            pending_stream_info = Some(parse_attribute_list(raw));
        } else if let Some(raw) = line.strip_prefix(tags::MEDIA) {
            let attrs = parse_attribute_list(raw);
            if attrs.get("TYPE") != Some("AUDIO") {
                continue;
            }
            playlist.audio_tracks.push(audio_track(&attrs, base_url));
        } else if line.starts_with('#') {
            continue;
        } else if let Some(info) = pending_stream_info.take() {
            playlist.variants.push(Variant {
                bandwidth: info.get("BANDWIDTH").and_then(parse_bandwidth),
                resolution: info.get_owned("RESOLUTION"),
                uri: UrlUtils::resolve(base_url, line),
            });
        }
    }

    playlist
}

fn audio_track(attrs: &AttributeList, base_url: &str) -> AudioTrack {
    AudioTrack {
        name: attrs.get_owned("NAME"),
        language: attrs.get_owned("LANGUAGE"),
        group_id: attrs.get_owned("GROUP-ID"),
        uri: attrs.get("URI").map(|uri| UrlUtils::resolve(base_url, uri)),
        default: attrs.get("DEFAULT").map(|value| value == "YES"),
    }
}

fn parse_bandwidth(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
