use crate::types::{Track, TrackTableRow};

const TRACK_EMBED_BASE: &str = "https://open.spotify.com/embed/track";
const PLAYLIST_BASE: &str = "https://open.spotify.com/playlist";
const PLAYLIST_EMBED_BASE: &str = "https://open.spotify.com/embed/playlist";

/// Formats milliseconds as `m:ss`. Zero renders as `0:00`.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{}:{:02}", minutes, seconds)
}

/// Pulls the track id out of a streaming-service track link such as
/// `https://open.spotify.com/track/<id>?si=...`.
pub fn extract_track_id(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("/track/")?;
    let id = rest.split(['?', '#', '/']).next()?;
    if id.is_empty() { None } else { Some(id) }
}

pub fn track_embed_url(track_id: &str) -> String {
    format!("{}/{}", TRACK_EMBED_BASE, track_id)
}

pub fn playlist_url(playlist_id: &str) -> String {
    format!("{}/{}", PLAYLIST_BASE, playlist_id)
}

pub fn playlist_embed_url(playlist_id: &str) -> String {
    format!("{}/{}", PLAYLIST_EMBED_BASE, playlist_id)
}

/// Endpoint used for moods that have no dedicated route.
pub fn search_path(tag: &str) -> String {
    format!(
        "/api/music/search?q={}",
        urlencoding::encode(&format!("{} therapy music", tag))
    )
}

pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub fn track_table_rows(tracks: &[Track], current: Option<usize>) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            index: if Some(i) == current {
                format!("> {}", i + 1)
            } else {
                format!("{}", i + 1)
            },
            name: t.display_name().to_string(),
            artists: t.artist_names(),
            duration: t.formatted_duration(),
            preview: if t.preview().is_some() {
                "yes".to_string()
            } else {
                String::new()
            },
        })
        .collect()
}
