#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use moodplayer::{
    backend::TrackSource,
    catalog::MoodCatalog,
    config::Timings,
    controller::MoodPlayerController,
    errors::LoadError,
    render::{ButtonState, NotificationPhase, PlayerView, RenderPort, RenderResult},
    types::{FallbackPlaylist, Notification, Severity, Track},
};
use parking_lot::Mutex;
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Highlight(String),
    Status(String),
    Tracks(Vec<String>),
    Fallback(String),
    NowPlaying(String),
    ShowPlayer,
    Player(PlayerView),
    StopAudio,
    Queue(usize),
    Button(ButtonState),
    ListenTime(u32),
    Notification(String, Severity, NotificationPhase),
}

/// Render port that implements every region and records what it was asked to draw.
#[derive(Default)]
pub struct RecordingPort {
    events: Mutex<Vec<Event>>,
}

impl RecordingPort {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    fn push(&self, event: Event) -> RenderResult {
        self.events.lock().push(event);
        Ok(())
    }

    /// Notifications that reached the given phase, as (text, severity).
    pub fn notifications(&self, phase: NotificationPhase) -> Vec<(String, Severity)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Notification(text, severity, p) if p == phase => Some((text, severity)),
                _ => None,
            })
            .collect()
    }

    pub fn players(&self) -> Vec<PlayerView> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Player(view) => Some(view),
                _ => None,
            })
            .collect()
    }
}

impl RenderPort for RecordingPort {
    fn highlight_mood(&self, mood: &str) -> RenderResult {
        self.push(Event::Highlight(mood.to_string()))
    }

    fn render_status(&self, text: &str) -> RenderResult {
        self.push(Event::Status(text.to_string()))
    }

    fn render_tracks(&self, tracks: &[Track]) -> RenderResult {
        self.push(Event::Tracks(
            tracks.iter().map(|t| t.display_name().to_string()).collect(),
        ))
    }

    fn render_fallback(&self, playlist: &FallbackPlaylist, _mood: &str) -> RenderResult {
        self.push(Event::Fallback(playlist.name.clone()))
    }

    fn render_now_playing(&self, track: &Track) -> RenderResult {
        self.push(Event::NowPlaying(track.display_name().to_string()))
    }

    fn show_player(&self) -> RenderResult {
        self.push(Event::ShowPlayer)
    }

    fn render_player(&self, view: &PlayerView) -> RenderResult {
        self.push(Event::Player(view.clone()))
    }

    fn stop_audio(&self) -> RenderResult {
        self.push(Event::StopAudio)
    }

    fn render_queue(&self, _tracks: &[Track], current: usize) -> RenderResult {
        self.push(Event::Queue(current))
    }

    fn render_play_button(&self, state: ButtonState) -> RenderResult {
        self.push(Event::Button(state))
    }

    fn render_listen_time(&self, units: u32) -> RenderResult {
        self.push(Event::ListenTime(units))
    }

    fn render_notification(
        &self,
        notification: &Notification,
        phase: NotificationPhase,
    ) -> RenderResult {
        self.push(Event::Notification(
            notification.text.clone(),
            notification.severity,
            phase,
        ))
    }
}

/// Render port without a single region.
pub struct BarePort;

impl RenderPort for BarePort {}

/// Track source answering every request with the same canned reply.
pub struct StubSource {
    reply: Mutex<Result<Vec<Track>, LoadError>>,
    requests: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl StubSource {
    pub fn new(reply: Result<Vec<Track>, LoadError>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(reply),
            requests: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    /// Holds every request until the gate is notified.
    pub fn gated(reply: Result<Vec<Track>, LoadError>, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(reply),
            requests: Mutex::new(Vec::new()),
            gate: Some(gate),
        })
    }

    pub fn set_reply(&self, reply: Result<Vec<Track>, LoadError>) {
        *self.reply.lock() = reply;
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl TrackSource for StubSource {
    async fn fetch_tracks(&self, endpoint: &str) -> Result<Vec<Track>, LoadError> {
        self.requests.lock().push(endpoint.to_string());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.reply.lock().clone()
    }
}

pub fn numbered_tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| {
            Track::new(format!("Track {}", i), &["Artist"])
                .with_duration_ms(180_000)
                .with_preview(format!("http://x/{}.mp3", i))
        })
        .collect()
}

pub fn controller(
    source: Arc<StubSource>,
    port: Arc<dyn RenderPort>,
) -> MoodPlayerController {
    MoodPlayerController::new(
        MoodCatalog::builtin().expect("builtin catalog is valid"),
        source,
        port,
        Timings::default(),
    )
}
