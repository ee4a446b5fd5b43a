mod common;

use std::{sync::Arc, time::Duration};

use common::{BarePort, Event, RecordingPort, StubSource, controller, numbered_tracks};
use moodplayer::{
    catalog::MoodCatalog,
    controller::{DEGRADED_MESSAGE, LoadOutcome, MAX_TRACKS, PAUSED_MESSAGE, SELECT_MOOD_FIRST},
    errors::LoadError,
    mood::{Mood, MoodSelection},
    render::{NotificationPhase, PlayerView},
    types::{PlaybackState, Severity, Track},
};
use tokio::{sync::Notify, time::sleep};

fn names(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(|t| t.display_name().to_string()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_track_list_is_capped_and_keeps_order() {
    for mood in Mood::ALL {
        for n in [1, 5, 12, 13, 20] {
            let port = RecordingPort::new();
            let source = StubSource::new(Ok(numbered_tracks(n)));
            let player = controller(source, port.clone());

            let outcome = player.select_mood(mood).await;
            let expected = n.min(MAX_TRACKS);

            assert_eq!(outcome, LoadOutcome::Loaded(expected));
            assert_eq!(
                names(&player.tracks()),
                names(&numbered_tracks(n)[..expected])
            );
            assert_eq!(player.current_mood(), Some(MoodSelection::Known(mood)));
            assert!(player.fallback().is_none());
            assert!(!player.is_loading());
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_successful_load_renders_and_notifies() {
    let port = RecordingPort::new();
    let source = StubSource::new(Ok(numbered_tracks(3)));
    let player = controller(source.clone(), port.clone());

    player.select_mood(Mood::Happy).await;

    assert_eq!(
        source.requests(),
        vec!["/api/music/mood-enhanced?mood=happy".to_string()]
    );

    let events = port.events();
    assert_eq!(events[0], Event::Highlight("happy".to_string()));
    assert!(events.contains(&Event::Status("Finding therapeutic happy music...".to_string())));
    assert!(events.contains(&Event::Tracks(names(&numbered_tracks(3)))));
    assert!(events.contains(&Event::Status("Found 3 happy therapy tracks".to_string())));
    assert_eq!(
        port.notifications(NotificationPhase::Created),
        vec![(
            "Successfully loaded 3 therapeutic tracks".to_string(),
            Severity::Success
        )]
    );
    assert_eq!(player.state().current_index, Some(0));
    assert!(!player.state().is_playing);
}

#[tokio::test(start_paused = true)]
async fn test_empty_results_fall_back_to_curated_playlist() {
    let catalog = MoodCatalog::builtin().unwrap();

    for mood in Mood::ALL {
        let port = RecordingPort::new();
        let player = controller(StubSource::new(Ok(Vec::new())), port.clone());

        let outcome = player.select_mood(mood).await;

        assert_eq!(outcome, LoadOutcome::Degraded(LoadError::EmptyResult));
        let expected = &catalog.entry(mood).fallback;
        assert_eq!(player.fallback().as_ref(), Some(expected));
        assert!(port.events().contains(&Event::Fallback(expected.name.clone())));
        assert!(
            !port
                .events()
                .iter()
                .any(|e| matches!(e, Event::Tracks(_))),
            "individual tracks must not be rendered in degraded mode"
        );
        assert!(player.tracks().is_empty());
        assert_eq!(player.state().current_index, None);
    }
}

#[tokio::test(start_paused = true)]
async fn test_failed_fetch_falls_back_with_warning() {
    let port = RecordingPort::new();
    let source = StubSource::new(Err(LoadError::Network("connection refused".to_string())));
    let player = controller(source, port.clone());

    let outcome = player.select_mood(Mood::Sad).await;

    assert!(matches!(outcome, LoadOutcome::Degraded(LoadError::Network(_))));
    assert_eq!(player.fallback().unwrap().name, "Gentle Healing Music");
    assert_eq!(
        port.notifications(NotificationPhase::Created),
        vec![(DEGRADED_MESSAGE.to_string(), Severity::Warning)]
    );
    assert!(
        port.events()
            .contains(&Event::Status("Curated sad therapy playlist ready".to_string()))
    );
    assert!(!player.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_focused_server_error_shows_focus_playlist_until_embedded() {
    let port = RecordingPort::new();
    let source = StubSource::new(Err(LoadError::Network(
        "HTTP 500: Internal Server Error".to_string(),
    )));
    let player = controller(source, port.clone());

    player.select_mood(Mood::Focused).await;

    let fallback = player.fallback().unwrap();
    assert_eq!(fallback.name, "Focus & Concentration");
    assert!(!player.state().is_playing);

    // nothing to play from the track list
    player.toggle_playback();
    assert!(!player.state().is_playing);

    assert!(player.embed_current_fallback());
    let state = player.state();
    assert!(state.is_playing);
    assert!(state.embed_active);
    assert_eq!(state.current_index, None);
    assert_eq!(
        port.players().last(),
        Some(&PlayerView::PlaylistEmbed {
            embed_url: "https://open.spotify.com/embed/playlist/37i9dQZF1DWZeKCadgRdKQ".to_string()
        })
    );
    assert_eq!(
        player.fallback_link().as_deref(),
        Some("https://open.spotify.com/playlist/37i9dQZF1DWZeKCadgRdKQ")
    );
}

#[tokio::test(start_paused = true)]
async fn test_anxious_preview_plays_inline() {
    let port = RecordingPort::new();
    let track = Track::new("Calm", &["A"])
        .with_duration_ms(185_000)
        .with_preview("http://x/p.mp3");
    let source = StubSource::new(Ok(vec![track]));
    let player = controller(source.clone(), port.clone());

    assert_eq!(player.select_mood(Mood::Anxious).await, LoadOutcome::Loaded(1));
    assert_eq!(source.requests(), vec!["/api/music/crisis-intervention".to_string()]);

    port.clear();
    assert!(player.play_track(0));

    assert_eq!(
        player.state(),
        PlaybackState {
            current_index: Some(0),
            is_playing: true,
            embed_active: false,
        }
    );
    assert_eq!(
        port.players(),
        vec![PlayerView::Preview {
            url: "http://x/p.mp3".to_string(),
            title: "Calm".to_string(),
        }]
    );
    let events = port.events();
    assert!(events.contains(&Event::Status("Now Playing: Calm".to_string())));
    assert!(events.contains(&Event::NowPlaying("Calm".to_string())));
    assert!(events.contains(&Event::ShowPlayer));
    assert!(events.contains(&Event::Queue(0)));
    assert!(events.contains(&Event::ListenTime(1)));
    assert_eq!(
        port.notifications(NotificationPhase::Created),
        vec![("Playing preview: Calm".to_string(), Severity::Success)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_playback_renderer_priority() {
    let port = RecordingPort::new();
    let tracks = vec![
        Track::new("Both", &["A"])
            .with_preview("http://x/both.mp3")
            .with_external_url("https://open.spotify.com/track/both123"),
        Track::new("Link", &["B"]).with_external_url("https://open.spotify.com/track/abc123?si=x"),
        Track::new("Bare", &["C"]),
        Track::new("Album", &["D"]).with_external_url("https://open.spotify.com/album/xyz"),
    ];
    let player = controller(StubSource::new(Ok(tracks)), port.clone());
    player.select_mood(Mood::Calm).await;
    port.clear();

    player.play_track(0);
    assert!(matches!(port.players().last(), Some(PlayerView::Preview { .. })));

    player.play_track(1);
    assert_eq!(
        port.players().last(),
        Some(&PlayerView::TrackEmbed {
            embed_url: "https://open.spotify.com/embed/track/abc123".to_string()
        })
    );
    assert!(player.state().is_playing);

    player.play_track(2);
    assert_eq!(
        port.players().last(),
        Some(&PlayerView::TrackInfo {
            title: "Bare".to_string(),
            artists: "C".to_string(),
            link: None,
        })
    );
    assert!(!player.state().is_playing);
    assert_eq!(player.state().current_index, Some(2));

    // a link without a track id still gets a link-out card
    player.play_track(3);
    assert_eq!(
        port.players().last(),
        Some(&PlayerView::TrackInfo {
            title: "Album".to_string(),
            artists: "D".to_string(),
            link: Some("https://open.spotify.com/album/xyz".to_string()),
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_next_track_cycles_back_to_start() {
    let player = controller(StubSource::new(Ok(numbered_tracks(5))), RecordingPort::new());
    player.select_mood(Mood::Motivated).await;
    player.play_track(2);

    for _ in 0..5 {
        assert!(player.next_track());
    }
    assert_eq!(player.state().current_index, Some(2));

    player.play_track(4);
    player.next_track();
    assert_eq!(player.state().current_index, Some(0));
}

#[tokio::test(start_paused = true)]
async fn test_previous_track_wraps_to_end() {
    let player = controller(StubSource::new(Ok(numbered_tracks(4))), RecordingPort::new());
    player.select_mood(Mood::Calm).await;

    player.play_track(0);
    assert!(player.previous_track());
    assert_eq!(player.state().current_index, Some(3));

    for _ in 0..4 {
        player.previous_track();
    }
    assert_eq!(player.state().current_index, Some(3));
}

#[tokio::test(start_paused = true)]
async fn test_navigation_on_empty_list_changes_nothing() {
    let port = RecordingPort::new();
    let player = controller(StubSource::new(Ok(Vec::new())), port.clone());

    let before = player.state();
    assert!(!player.next_track());
    assert!(!player.previous_track());
    assert_eq!(player.state(), before);

    // same after a degraded load
    player.select_mood(Mood::Happy).await;
    let before = player.state();
    port.clear();
    assert!(!player.next_track());
    assert!(!player.previous_track());
    assert_eq!(player.state(), before);
    assert!(port.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_play_out_of_range_is_noop() {
    let port = RecordingPort::new();
    let player = controller(StubSource::new(Ok(numbered_tracks(3))), port.clone());
    player.select_mood(Mood::Sad).await;
    player.play_track(1);

    let before = player.state();
    let units = player.listen_units();
    port.clear();

    assert!(!player.play_track(3));
    assert!(!player.play_track(usize::MAX));

    assert_eq!(player.state(), before);
    assert_eq!(player.listen_units(), units);
    assert!(port.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_toggle_twice_returns_to_stopped() {
    let port = RecordingPort::new();
    let player = controller(StubSource::new(Ok(numbered_tracks(2))), port.clone());
    player.select_mood(Mood::Focused).await;
    assert!(!player.state().is_playing);

    player.toggle_playback();
    assert!(player.state().is_playing);
    assert_eq!(player.state().current_index, Some(0));

    player.toggle_playback();
    assert!(!player.state().is_playing);
    assert_eq!(player.state().current_index, Some(0));

    let created = port.notifications(NotificationPhase::Created);
    assert_eq!(
        created.last(),
        Some(&(PAUSED_MESSAGE.to_string(), Severity::Success))
    );
    assert!(port.events().contains(&Event::StopAudio));
}

#[tokio::test(start_paused = true)]
async fn test_toggle_without_tracks_warns() {
    let port = RecordingPort::new();
    let player = controller(StubSource::new(Ok(Vec::new())), port.clone());

    player.toggle_playback();

    assert_eq!(player.state(), PlaybackState::default());
    assert_eq!(
        port.notifications(NotificationPhase::Created),
        vec![(SELECT_MOOD_FIRST.to_string(), Severity::Warning)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_resume_plays_current_track() {
    let player = controller(StubSource::new(Ok(numbered_tracks(3))), RecordingPort::new());
    assert!(!player.resume());

    player.select_mood(Mood::Calm).await;
    player.play_track(2);
    player.pause();
    assert!(!player.state().is_playing);

    assert!(player.resume());
    assert_eq!(player.state().current_index, Some(2));
    assert!(player.state().is_playing);
}

#[tokio::test(start_paused = true)]
async fn test_listen_counter_counts_track_starts() {
    let port = RecordingPort::new();
    let player = controller(StubSource::new(Ok(numbered_tracks(3))), port.clone());
    player.select_mood(Mood::Happy).await;

    player.play_track(0);
    player.next_track();
    player.play_track(0);

    assert_eq!(player.listen_units(), 3);
    assert!(port.events().contains(&Event::ListenTime(3)));
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_load_is_rejected() {
    let gate = Arc::new(Notify::new());
    let source = StubSource::gated(Ok(numbered_tracks(2)), gate.clone());
    let player = controller(source.clone(), RecordingPort::new());

    let first = player.select_mood(Mood::Calm);
    let second = async {
        tokio::task::yield_now().await;
        assert!(player.is_loading());
        let outcome = player.select_mood(Mood::Happy).await;
        gate.notify_one();
        outcome
    };

    let (first, second) = tokio::join!(first, second);

    assert_eq!(first, LoadOutcome::Loaded(2));
    assert_eq!(second, LoadOutcome::Busy);
    assert_eq!(source.requests().len(), 1);
    assert!(!player.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_unlisted_mood_uses_search_and_calm_fallback() {
    let source = StubSource::new(Err(LoadError::Network("down".to_string())));
    let player = controller(source.clone(), RecordingPort::new());

    player.select_mood_tag("Sleepy").await;

    assert_eq!(
        source.requests(),
        vec!["/api/music/search?q=Sleepy%20therapy%20music".to_string()]
    );
    assert_eq!(
        player.current_mood(),
        Some(MoodSelection::Unlisted("Sleepy".to_string()))
    );
    assert_eq!(player.fallback().unwrap().name, "Peaceful Meditation Music");
}

#[tokio::test(start_paused = true)]
async fn test_benefit_message_follows_after_delay() {
    let port = RecordingPort::new();
    let player = controller(StubSource::new(Ok(numbered_tracks(1))), port.clone());
    player.select_mood(Mood::Anxious).await;

    sleep(Duration::from_millis(1900)).await;
    assert!(
        !port
            .notifications(NotificationPhase::Created)
            .iter()
            .any(|(_, s)| *s == Severity::Info)
    );

    sleep(Duration::from_millis(150)).await;
    let created = port.notifications(NotificationPhase::Created);
    assert_eq!(
        created.last(),
        Some(&(
            "Therapy Benefit: Calming rhythms and frequencies can effectively lower cortisol levels and reduce anxiety symptoms.".to_string(),
            Severity::Info
        ))
    );
    // the benefit replaced the load notification
    assert!(
        port.notifications(NotificationPhase::Removed)
            .contains(&("Successfully loaded 1 therapeutic tracks".to_string(), Severity::Success))
    );
}

#[tokio::test(start_paused = true)]
async fn test_degraded_load_also_schedules_benefit() {
    let port = RecordingPort::new();
    let player = controller(StubSource::new(Ok(Vec::new())), port.clone());
    player.select_mood_tag("rainy").await;

    sleep(Duration::from_millis(2050)).await;
    assert_eq!(
        port.notifications(NotificationPhase::Created).last(),
        Some(&(
            "Therapy Benefit: Music therapy supports emotional wellness and mental health."
                .to_string(),
            Severity::Info
        ))
    );
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_pending_timers() {
    let port = RecordingPort::new();
    let player = controller(StubSource::new(Ok(numbered_tracks(2))), port.clone());
    player.select_mood(Mood::Calm).await;
    assert_eq!(player.pending_timers(), 1);

    player.shutdown();
    port.clear();
    sleep(Duration::from_secs(10)).await;

    assert!(port.events().is_empty());
    assert_eq!(player.pending_timers(), 0);
    assert!(player.notifications().current().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_missing_regions_are_skipped() {
    let source = StubSource::new(Ok(numbered_tracks(2)));
    let player = controller(source, Arc::new(BarePort));

    assert_eq!(player.select_mood(Mood::Sad).await, LoadOutcome::Loaded(2));
    assert!(player.play_track(1));
    assert_eq!(player.state().current_index, Some(1));
    assert!(player.state().is_playing);

    player.pause();
    assert!(!player.state().is_playing);
    player.embed_fallback("https://open.spotify.com/embed/playlist/x");
    assert!(player.state().embed_active);
}

#[tokio::test(start_paused = true)]
async fn test_new_mood_replaces_list_and_stops_playback() {
    let port = RecordingPort::new();
    let source = StubSource::new(Ok(numbered_tracks(5)));
    let player = controller(source.clone(), port.clone());

    player.select_mood(Mood::Happy).await;
    player.play_track(4);
    assert!(player.state().is_playing);

    source.set_reply(Ok(numbered_tracks(2)));
    port.clear();
    player.select_mood(Mood::Sad).await;

    assert_eq!(player.tracks().len(), 2);
    assert_eq!(
        player.state(),
        PlaybackState {
            current_index: Some(0),
            is_playing: false,
            embed_active: false,
        }
    );
    assert!(port.events().contains(&Event::StopAudio));

    // a degraded reload clears the list and stops an embed as well
    player.embed_fallback("https://open.spotify.com/embed/playlist/x");
    source.set_reply(Err(LoadError::EmptyResult));
    player.select_mood(Mood::Calm).await;
    assert!(player.tracks().is_empty());
    assert_eq!(player.state(), PlaybackState::default());
}

#[tokio::test(start_paused = true)]
async fn test_placeholder_text_for_malformed_tracks() {
    let raw = serde_json::json!({
        "success": true,
        "results": [
            { "artists": [{ "name": "A" }], "duration_ms": 1000 },
            { "name": "Solo" },
            42
        ]
    });
    let response: moodplayer::types::MoodResponse = serde_json::from_value(raw).unwrap();
    let tracks = moodplayer::backend::tracks_from_response(response).unwrap();

    let port = RecordingPort::new();
    let player = controller(StubSource::new(Ok(tracks)), port.clone());
    assert_eq!(player.select_mood(Mood::Happy).await, LoadOutcome::Loaded(3));

    let tracks = player.tracks();
    assert_eq!(tracks[0].display_name(), "Unknown Track");
    assert_eq!(tracks[0].artist_names(), "A");
    assert_eq!(tracks[1].artist_names(), "Unknown Artist");
    assert_eq!(tracks[2].display_name(), "Unknown Track");

    player.play_track(2);
    assert_eq!(
        port.players().last(),
        Some(&PlayerView::TrackInfo {
            title: "Unknown Track".to_string(),
            artists: "Unknown Artist".to_string(),
            link: None,
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_external_links() {
    let tracks = vec![
        Track::new("One", &["A"]).with_external_url("https://open.spotify.com/track/1"),
        Track::new("Two", &["B"]),
    ];
    let player = controller(StubSource::new(Ok(tracks)), RecordingPort::new());
    player.select_mood(Mood::Happy).await;

    assert_eq!(
        player.external_link(0).as_deref(),
        Some("https://open.spotify.com/track/1")
    );
    assert_eq!(player.external_link(1), None);
    assert_eq!(player.external_link(5), None);
    assert_eq!(player.fallback_link(), None);
    assert!(!player.embed_current_fallback());
}
