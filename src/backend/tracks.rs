use async_trait::async_trait;
use reqwest::Client;

use crate::{
    backend::{TrackSource, tracks_from_response},
    config::Settings,
    errors::LoadError,
    types::{MoodResponse, Track},
    utils,
};

/// Fetches mood playlists from the recommendation backend over HTTP.
pub struct HttpTrackSource {
    client: Client,
    base_url: String,
}

impl HttpTrackSource {
    pub fn new(settings: &Settings) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl TrackSource for HttpTrackSource {
    async fn fetch_tracks(&self, endpoint: &str) -> Result<Vec<Track>, LoadError> {
        let url = utils::join_url(&self.base_url, endpoint);
        log::debug!("Fetching tracks from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Network(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown status")
            )));
        }

        let body = response.text().await?;
        let parsed: MoodResponse = serde_json::from_str(&body)?;
        log::debug!(
            "Backend answered success={} with {} results",
            parsed.success,
            parsed.results.len()
        );

        tracks_from_response(parsed)
    }
}
