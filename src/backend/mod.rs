//! # Backend Module
//!
//! Retrieval of mood playlists from the music-recommendation backend.
//!
//! The controller never talks HTTP itself. It asks a [`TrackSource`] for the
//! tracks behind an endpoint path and treats every failure the same way, so
//! tests and alternative front-ends can plug in their own source.
//!
//! - [`TrackSource`] - the fetch contract
//! - [`HttpTrackSource`] - `reqwest` implementation against a live backend
//! - [`tracks_from_response`] - shared interpretation of a response body

mod tracks;

use async_trait::async_trait;

use crate::{errors::LoadError, types::MoodResponse, types::Track};

pub use tracks::HttpTrackSource;

#[async_trait]
pub trait TrackSource: Send + Sync {
    /// Fetches the tracks behind an endpoint path such as `/api/music/study-focus`.
    ///
    /// An `Ok` result may still be empty; the controller treats that exactly
    /// like [`LoadError::EmptyResult`].
    async fn fetch_tracks(&self, endpoint: &str) -> Result<Vec<Track>, LoadError>;
}

/// Turns a decoded response body into tracks.
///
/// `success: false` and an empty `results` array both count as no result.
pub fn tracks_from_response(response: MoodResponse) -> Result<Vec<Track>, LoadError> {
    if !response.success || response.results.is_empty() {
        return Err(LoadError::EmptyResult);
    }
    Ok(response.tracks())
}
