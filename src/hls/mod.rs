//! HLS (M3U8) manifest parsing
//!
//! Only the subset of HLS needed to describe a stream is understood:
//! variant streams and audio renditions from master playlists, and segment
//! durations plus end-of-list status from media playlists. All parsers are
//! pure, best-effort functions over text; malformed lines are skipped and
//! never abort a parse.

pub mod attributes;
pub mod master;
pub mod media;

pub use attributes::{parse_attribute_list, tokenize_attribute_list, AttributeList};
pub use master::{parse_master_playlist, MasterPlaylist};
pub use media::parse_media_playlist;

/// Tag prefixes recognised by the parsers (case-sensitive)
pub mod tags {
    pub const STREAM_INF: &str = "#EXT-X-STREAM-INF:";
    pub const MEDIA: &str = "#EXT-X-MEDIA:";
    pub const EXTINF: &str = "#EXTINF:";
    pub const PLAYLIST_TYPE: &str = "#EXT-X-PLAYLIST-TYPE:";
    pub const ENDLIST: &str = "#EXT-X-ENDLIST";
}
