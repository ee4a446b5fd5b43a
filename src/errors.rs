//! Typed errors for loading, configuration and rendering.
//!
//! None of these are fatal to a running controller: load errors collapse into
//! the degraded fallback display, and render errors only skip the step that
//! hit a missing region. Catalog errors are raised once, at startup.

use std::fmt;

use thiserror::Error;

use crate::mood::Mood;

/// Everything that can go wrong while retrieving tracks for a mood.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Transport failure or a response status outside 2xx
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered but had nothing for us
    #[error("No tracks returned")]
    EmptyResult,

    /// The response body could not be decoded
    #[error("Malformed track data: {0}")]
    MalformedTrack(String),
}

impl From<reqwest::Error> for LoadError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            LoadError::MalformedTrack(e.to_string())
        } else {
            LoadError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::MalformedTrack(e.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No catalog entry for mood '{0}'")]
    MissingEntry(Mood),

    #[error("Mood '{0}' has no endpoint path")]
    MissingEndpoint(Mood),

    #[error("Mood '{0}' has an incomplete fallback playlist")]
    MissingFallback(Mood),

    #[error("Mood '{0}' is listed more than once")]
    DuplicateEntry(Mood),
}

/// Named display areas the controller writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    MoodButtons,
    TrackList,
    PlayerPanel,
    Queue,
    NowPlaying,
    StatusLabel,
    PlayButton,
    ListenTime,
    NotificationTray,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::MoodButtons => "mood buttons",
            Region::TrackList => "track list",
            Region::PlayerPanel => "player panel",
            Region::Queue => "queue",
            Region::NowPlaying => "now playing",
            Region::StatusLabel => "status label",
            Region::PlayButton => "play button",
            Region::ListenTime => "listen time",
            Region::NotificationTray => "notification tray",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    #[error("Render region '{0}' is not available")]
    MissingRegion(Region),
}
