//! The display side of the player.
//!
//! A [`RenderPort`] exposes the named regions the controller writes to. Every
//! method has a default that reports its region as missing, so a port only
//! implements the regions it actually has and the controller skips the rest.

use crate::{
    errors::{Region, RenderError},
    types::{FallbackPlaylist, Notification, Track},
    utils,
};

pub type RenderResult = Result<(), RenderError>;

/// What the player panel should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerView {
    /// Inline 30-second preview audio
    Preview { url: String, title: String },
    /// Embedded third-party player for a single track
    TrackEmbed { embed_url: String },
    /// Static card with a link-out, used when nothing is playable inline
    TrackInfo {
        title: String,
        artists: String,
        link: Option<String>,
    },
    /// Embedded fallback playlist
    PlaylistEmbed { embed_url: String },
}

impl PlayerView {
    /// Picks the richest view a track supports: inline preview first, then an
    /// embedded player, then a plain info card.
    pub fn for_track(track: &Track) -> Self {
        if let Some(url) = track.preview() {
            return PlayerView::Preview {
                url: url.to_string(),
                title: track.display_name().to_string(),
            };
        }

        if let Some(id) = track.external_link().and_then(utils::extract_track_id) {
            return PlayerView::TrackEmbed {
                embed_url: utils::track_embed_url(id),
            };
        }

        PlayerView::TrackInfo {
            title: track.display_name().to_string(),
            artists: track.artist_names(),
            link: track.external_link().map(str::to_string),
        }
    }

    /// Whether showing this view starts audible playback.
    pub fn is_playback(&self) -> bool {
        !matches!(self, PlayerView::TrackInfo { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Loading,
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationPhase {
    Created,
    Shown,
    Hiding,
    Removed,
}

fn missing(region: Region) -> RenderResult {
    Err(RenderError::MissingRegion(region))
}

pub trait RenderPort: Send + Sync {
    fn highlight_mood(&self, _mood: &str) -> RenderResult {
        missing(Region::MoodButtons)
    }

    fn render_status(&self, _text: &str) -> RenderResult {
        missing(Region::StatusLabel)
    }

    fn render_tracks(&self, _tracks: &[Track]) -> RenderResult {
        missing(Region::TrackList)
    }

    /// Single summary card shown in place of the track list in degraded mode.
    fn render_fallback(&self, _playlist: &FallbackPlaylist, _mood: &str) -> RenderResult {
        missing(Region::TrackList)
    }

    fn render_now_playing(&self, _track: &Track) -> RenderResult {
        missing(Region::NowPlaying)
    }

    fn show_player(&self) -> RenderResult {
        missing(Region::PlayerPanel)
    }

    fn render_player(&self, _view: &PlayerView) -> RenderResult {
        missing(Region::PlayerPanel)
    }

    /// Silences every active audio element and embed.
    fn stop_audio(&self) -> RenderResult {
        missing(Region::PlayerPanel)
    }

    fn render_queue(&self, _tracks: &[Track], _current: usize) -> RenderResult {
        missing(Region::Queue)
    }

    fn render_play_button(&self, _state: ButtonState) -> RenderResult {
        missing(Region::PlayButton)
    }

    fn render_listen_time(&self, _units: u32) -> RenderResult {
        missing(Region::ListenTime)
    }

    fn render_notification(
        &self,
        _notification: &Notification,
        _phase: NotificationPhase,
    ) -> RenderResult {
        missing(Region::NotificationTray)
    }
}

/// Logs and swallows a render failure; a missing region never stops an operation.
pub(crate) fn skip_missing(result: RenderResult) {
    if let Err(e) = result {
        log::debug!("Skipping render step: {}", e);
    }
}
