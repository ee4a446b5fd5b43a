use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tabled::Tabled;

use crate::utils;

pub const UNKNOWN_TRACK: &str = "Unknown Track";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default, deserialize_with = "lenient::string")]
    pub spotify: Option<String>,
}

/// A track as handed out by the recommendation backend.
///
/// Every field is optional on the wire and decoded on its own: a field of
/// the wrong type reads as missing without touching its neighbours.
/// Accessors substitute placeholders for whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::artists")]
    pub artists: Option<Vec<Artist>>,
    /// Older backend builds send a single artist string instead of `artists`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "lenient::millis")]
    pub duration_ms: Option<u64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub preview_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::external_urls")]
    pub external_urls: Option<ExternalUrls>,
}

impl Track {
    pub fn new(name: impl Into<String>, artists: &[&str]) -> Self {
        Self {
            name: Some(name.into()),
            artists: Some(
                artists
                    .iter()
                    .map(|a| Artist {
                        name: Some(a.to_string()),
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_preview(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }

    pub fn with_external_url(mut self, url: impl Into<String>) -> Self {
        self.external_urls = Some(ExternalUrls {
            spotify: Some(url.into()),
        });
        self
    }

    /// Decodes one entry of the `results` array. Entries that are not JSON
    /// objects at all turn into an empty placeholder track.
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value::<Track>(value) {
            Ok(track) => track,
            Err(e) => {
                log::warn!("Replacing undecodable track entry with placeholder: {}", e);
                Track::default()
            }
        }
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNKNOWN_TRACK,
        }
    }

    pub fn artist_names(&self) -> String {
        let joined = match &self.artists {
            Some(artists) => artists
                .iter()
                .filter_map(|a| a.name.as_deref())
                .filter(|n| !n.trim().is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            None => self.artist.clone().unwrap_or_default(),
        };

        if joined.trim().is_empty() {
            UNKNOWN_ARTIST.to_string()
        } else {
            joined
        }
    }

    pub fn formatted_duration(&self) -> String {
        utils::format_duration(self.duration_ms.unwrap_or(0))
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview_url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn external_link(&self) -> Option<&str> {
        self.external_urls
            .as_ref()
            .and_then(|u| u.spotify.as_deref())
            .filter(|u| !u.is_empty())
    }
}

/// Field decoders for [`Track`] that map a value of the wrong type to `None`.
mod lenient {
    use super::*;

    fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn text(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    fn artist(value: Value) -> Artist {
        let name = match value {
            Value::Object(mut map) => map.remove("name").and_then(text),
            other => text(other),
        };
        Artist { name }
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(text(raw(d)?))
    }

    /// Whole or fractional milliseconds; negative and non-finite values are dropped.
    pub fn millis<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        Ok(match raw(d)? {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|ms| ms.is_finite() && *ms >= 0.0)
                    .map(|ms| ms.round() as u64)
            }),
            _ => None,
        })
    }

    /// A plain string is one artist, the same as the legacy `artist` field.
    pub fn artists<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<Artist>>, D::Error> {
        Ok(match raw(d)? {
            Value::Array(items) => Some(items.into_iter().map(artist).collect()),
            Value::String(name) => Some(vec![Artist { name: Some(name) }]),
            _ => None,
        })
    }

    pub fn external_urls<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<ExternalUrls>, D::Error> {
        Ok(match raw(d)? {
            Value::Object(mut map) => Some(ExternalUrls {
                spotify: map.remove("spotify").and_then(text),
            }),
            _ => None,
        })
    }
}

/// Response body of every mood endpoint.
///
/// `results` is kept as raw JSON so each entry can be decoded on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoodResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<Value>,
}

impl MoodResponse {
    pub fn tracks(self) -> Vec<Track> {
        self.results.into_iter().map(Track::from_value).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPlaylist {
    pub name: String,
    pub description: String,
    pub url: String,
    pub embed: String,
}

impl FallbackPlaylist {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.description, &self.url, &self.embed]
            .iter()
            .all(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub text: String,
    pub severity: Severity,
    pub display_duration: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
    /// `None` until a track list has been loaded.
    pub current_index: Option<usize>,
    pub is_playing: bool,
    /// A fallback playlist embed is on screen and counts as playing.
    pub embed_active: bool,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub index: String,
    pub name: String,
    pub artists: String,
    pub duration: String,
    pub preview: String,
}

#[derive(Tabled)]
pub struct MoodTableRow {
    pub mood: String,
    pub endpoint: String,
    pub fallback: String,
}
