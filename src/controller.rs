//! The mood player state machine.
//!
//! [`MoodPlayerController`] owns the session: which mood is selected, the
//! track list loaded for it, and what is playing. Everything visible goes out
//! through the injected [`RenderPort`]; everything remote comes in through the
//! injected [`TrackSource`].
//!
//! All methods take `&self`. The session lock is never held across an await
//! or while calling into the port, so a port may read the controller back
//! while it draws. [`MoodPlayerController::load_tracks`] is the only
//! suspending operation.
//! A second load while one is in flight is rejected, not queued.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use parking_lot::Mutex;

use crate::{
    backend::TrackSource,
    catalog::MoodCatalog,
    config::Timings,
    errors::LoadError,
    management::{NotificationManager, TimerSet},
    mood::MoodSelection,
    render::{ButtonState, PlayerView, RenderPort, skip_missing},
    types::{FallbackPlaylist, PlaybackState, Severity, Track},
};

/// Upper bound on the number of tracks kept from one response.
pub const MAX_TRACKS: usize = 12;

pub const DEGRADED_MESSAGE: &str = "Using curated playlists - API temporarily unavailable";
pub const SELECT_MOOD_FIRST: &str = "Please select a mood first";
pub const PAUSED_MESSAGE: &str = "Music paused";
pub const EMBEDDED_MESSAGE: &str = "Playlist embedded successfully";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Live tracks are on screen.
    Loaded(usize),
    /// The fallback playlist is on screen instead.
    Degraded(LoadError),
    /// Another load was still running; nothing happened.
    Busy,
}

#[derive(Debug, Default)]
struct Session {
    mood: Option<MoodSelection>,
    tracks: Vec<Track>,
    playback: PlaybackState,
    fallback: Option<FallbackPlaylist>,
    listen_units: u32,
}

struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct MoodPlayerController {
    catalog: MoodCatalog,
    source: Arc<dyn TrackSource>,
    port: Arc<dyn RenderPort>,
    notifications: Arc<NotificationManager>,
    timers: TimerSet,
    timings: Timings,
    loading: AtomicBool,
    session: Mutex<Session>,
}

impl MoodPlayerController {
    pub fn new(
        catalog: MoodCatalog,
        source: Arc<dyn TrackSource>,
        port: Arc<dyn RenderPort>,
        timings: Timings,
    ) -> Self {
        let notifications = Arc::new(NotificationManager::new(Arc::clone(&port), timings));
        Self {
            catalog,
            source,
            port,
            notifications,
            timers: TimerSet::new(),
            timings,
            loading: AtomicBool::new(false),
            session: Mutex::new(Session::default()),
        }
    }

    /// Highlights the mood and loads its playlist.
    pub async fn select_mood(&self, mood: impl Into<MoodSelection>) -> LoadOutcome {
        let selection = mood.into();
        skip_missing(self.port.highlight_mood(selection.label()));
        self.session.lock().mood = Some(selection.clone());
        self.load_tracks(selection).await
    }

    /// Same as [`Self::select_mood`] for a free-form tag, as sent by a mood button.
    pub async fn select_mood_tag(&self, tag: &str) -> LoadOutcome {
        self.select_mood(MoodSelection::parse(tag)).await
    }

    pub async fn load_tracks(&self, selection: MoodSelection) -> LoadOutcome {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("Ignoring load for '{}': another load is in flight", selection);
            return LoadOutcome::Busy;
        }
        let _guard = LoadingGuard(&self.loading);

        skip_missing(self.port.render_play_button(ButtonState::Loading));
        skip_missing(
            self.port
                .render_status(&format!("Finding therapeutic {} music...", selection)),
        );

        let endpoint = self.catalog.endpoint(&selection);
        log::debug!("Loading '{}' from {}", selection, endpoint);

        let result = match self.source.fetch_tracks(&endpoint).await {
            Ok(tracks) if tracks.is_empty() => Err(LoadError::EmptyResult),
            other => other,
        };

        let outcome = match result {
            Ok(mut tracks) => {
                tracks.truncate(MAX_TRACKS);
                self.show_tracks(&selection, tracks)
            }
            Err(e) => {
                log::warn!("Falling back to curated playlist for '{}': {}", selection, e);
                self.show_fallback(&selection);
                LoadOutcome::Degraded(e)
            }
        };

        self.schedule_benefit(&selection);
        outcome
    }

    fn show_tracks(&self, selection: &MoodSelection, tracks: Vec<Track>) -> LoadOutcome {
        let count = tracks.len();
        let was_playing = {
            let mut session = self.session.lock();
            session.tracks = tracks.clone();
            session.fallback = None;
            session.playback.current_index = Some(0);
            Self::reset_playback(&mut session)
        };

        if was_playing {
            skip_missing(self.port.stop_audio());
        }
        skip_missing(self.port.render_tracks(&tracks));
        skip_missing(self.port.render_play_button(ButtonState::Play));
        skip_missing(
            self.port
                .render_status(&format!("Found {} {} therapy tracks", count, selection)),
        );
        self.notifications.notify(
            format!("Successfully loaded {} therapeutic tracks", count),
            Severity::Success,
        );

        LoadOutcome::Loaded(count)
    }

    fn show_fallback(&self, selection: &MoodSelection) {
        let playlist = self.catalog.fallback(selection).clone();
        let was_playing = {
            let mut session = self.session.lock();
            session.tracks.clear();
            session.playback.current_index = None;
            session.fallback = Some(playlist.clone());
            Self::reset_playback(&mut session)
        };

        if was_playing {
            skip_missing(self.port.stop_audio());
        }
        skip_missing(self.port.render_fallback(&playlist, selection.label()));
        skip_missing(self.port.render_play_button(ButtonState::Play));
        skip_missing(
            self.port
                .render_status(&format!("Curated {} therapy playlist ready", selection)),
        );
        self.notifications.notify(DEGRADED_MESSAGE, Severity::Warning);
    }

    fn schedule_benefit(&self, selection: &MoodSelection) {
        let text = format!("Therapy Benefit: {}", self.catalog.benefit(selection));
        let notifications = Arc::clone(&self.notifications);
        let display = self.timings.benefit_display;

        self.timers
            .schedule(self.timings.benefit_delay, move || async move {
                notifications.notify_for(text, Severity::Info, display);
            });
    }

    // A replaced track list takes whatever was playing from it along.
    // Returns whether audio was running and has to be stopped.
    fn reset_playback(session: &mut Session) -> bool {
        let was_playing = session.playback.is_playing || session.playback.embed_active;
        session.playback.is_playing = false;
        session.playback.embed_active = false;
        was_playing
    }

    /// Plays the track at `index`. Returns `false` and changes nothing when
    /// the index is out of range.
    pub fn play_track(&self, index: usize) -> bool {
        let (track, view, queue, listen_units) = {
            let mut session = self.session.lock();
            let Some(track) = session.tracks.get(index).cloned() else {
                log::debug!("Ignoring play for out-of-range index {}", index);
                return false;
            };
            let view = PlayerView::for_track(&track);

            session.playback.current_index = Some(index);
            session.playback.is_playing = view.is_playback();
            session.playback.embed_active = false;
            session.listen_units += 1;

            (track, view, session.tracks.clone(), session.listen_units)
        };

        skip_missing(
            self.port
                .render_status(&format!("Now Playing: {}", track.display_name())),
        );
        skip_missing(self.port.render_now_playing(&track));
        skip_missing(self.port.show_player());
        skip_missing(self.port.render_queue(&queue, index));
        skip_missing(self.port.render_listen_time(listen_units));

        skip_missing(self.port.stop_audio());
        skip_missing(self.port.render_player(&view));
        skip_missing(self.port.render_play_button(if view.is_playback() {
            ButtonState::Pause
        } else {
            ButtonState::Play
        }));

        if let PlayerView::Preview { .. } = view {
            self.notifications.notify(
                format!("Playing preview: {}", track.display_name()),
                Severity::Success,
            );
        }

        true
    }

    pub fn toggle_playback(&self) {
        let (empty, playing, index) = {
            let session = self.session.lock();
            (
                session.tracks.is_empty(),
                session.playback.is_playing,
                session.playback.current_index,
            )
        };

        if empty {
            self.notifications.notify(SELECT_MOOD_FIRST, Severity::Warning);
            return;
        }

        if playing {
            self.pause();
        } else {
            self.play_track(index.unwrap_or(0));
        }
    }

    /// Plays the current track again; does nothing while no tracks are loaded.
    pub fn resume(&self) -> bool {
        let index = {
            let session = self.session.lock();
            if session.tracks.is_empty() {
                return false;
            }
            session.playback.current_index.unwrap_or(0)
        };
        self.play_track(index)
    }

    pub fn next_track(&self) -> bool {
        let target = {
            let session = self.session.lock();
            let len = session.tracks.len();
            if len == 0 {
                return false;
            }
            match session.playback.current_index {
                Some(i) => (i + 1) % len,
                None => 0,
            }
        };
        self.play_track(target)
    }

    pub fn previous_track(&self) -> bool {
        let target = {
            let session = self.session.lock();
            let len = session.tracks.len();
            if len == 0 {
                return false;
            }
            match session.playback.current_index {
                Some(i) if i > 0 => i - 1,
                _ => len - 1,
            }
        };
        self.play_track(target)
    }

    pub fn pause(&self) {
        {
            let mut session = self.session.lock();
            session.playback.is_playing = false;
            session.playback.embed_active = false;
        }
        skip_missing(self.port.stop_audio());
        skip_missing(self.port.render_play_button(ButtonState::Play));
        self.notifications.notify(PAUSED_MESSAGE, Severity::Success);
    }

    /// Embeds a playlist player in the player panel and counts it as playing.
    pub fn embed_fallback(&self, link: &str) {
        {
            let mut session = self.session.lock();
            session.playback.is_playing = true;
            session.playback.embed_active = true;
        }
        skip_missing(self.port.show_player());
        skip_missing(self.port.stop_audio());
        skip_missing(self.port.render_player(&PlayerView::PlaylistEmbed {
            embed_url: link.to_string(),
        }));
        skip_missing(self.port.render_play_button(ButtonState::Pause));
        self.notifications.notify(EMBEDDED_MESSAGE, Severity::Success);
    }

    /// Embeds the fallback playlist currently on display, if there is one.
    pub fn embed_current_fallback(&self) -> bool {
        match self.fallback() {
            Some(playlist) => {
                self.embed_fallback(&playlist.embed);
                true
            }
            None => false,
        }
    }

    /// Link-out target for the track at `index`.
    pub fn external_link(&self, index: usize) -> Option<String> {
        self.session
            .lock()
            .tracks
            .get(index)
            .and_then(|t| t.external_link().map(str::to_string))
    }

    pub fn fallback_link(&self) -> Option<String> {
        self.session.lock().fallback.as_ref().map(|p| p.url.clone())
    }

    pub fn state(&self) -> PlaybackState {
        self.session.lock().playback
    }

    pub fn tracks(&self) -> Vec<Track> {
        self.session.lock().tracks.clone()
    }

    pub fn current_mood(&self) -> Option<MoodSelection> {
        self.session.lock().mood.clone()
    }

    /// The fallback playlist on display, set only in degraded mode.
    pub fn fallback(&self) -> Option<FallbackPlaylist> {
        self.session.lock().fallback.clone()
    }

    pub fn listen_units(&self) -> u32 {
        self.session.lock().listen_units
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn catalog(&self) -> &MoodCatalog {
        &self.catalog
    }

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Cancels every pending timer so nothing fires against a torn-down view.
    pub fn shutdown(&self) {
        self.timers.cancel_all();
        self.notifications.shutdown();
    }
}

impl Drop for MoodPlayerController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
