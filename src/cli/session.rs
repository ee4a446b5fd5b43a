use std::sync::Arc;

use tabled::Table;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinSet,
};

use crate::{
    backend::HttpTrackSource,
    catalog::MoodCatalog,
    cli::{SessionCommand, TerminalRenderer},
    config::{Settings, Timings},
    controller::{LoadOutcome, MoodPlayerController},
    error, info, utils, warning,
};

const HELP: &str = "\
Commands:
  mood <name>   pick a mood (happy, sad, anxious, calm, focused, motivated)
  play <n>      play track n
  toggle        play or pause the current track
  resume        play the current track again
  next / prev   step through the track list
  pause         stop playback
  embed         play the curated fallback playlist here
  open [n]      open track n (or the fallback playlist) in the browser
  tracks        list the loaded tracks
  dismiss       close the current notification
  quit          leave the session";

pub async fn session(settings: Settings, mood: Option<String>) {
    let catalog = match MoodCatalog::builtin() {
        Ok(c) => c,
        Err(e) => error!("Invalid mood catalog: {}", e),
    };

    let source = match HttpTrackSource::new(&settings) {
        Ok(s) => s,
        Err(e) => error!("Cannot create HTTP client. Err: {}", e),
    };

    info!("Using recommendation backend at {}", source.base_url());

    let player = Arc::new(MoodPlayerController::new(
        catalog,
        Arc::new(source),
        Arc::new(TerminalRenderer::new()),
        Timings::default(),
    ));

    if let Some(tag) = mood {
        select(&player, &tag).await;
    } else {
        println!("{}", HELP);
    }

    // Loads run in the background so the prompt stays live while one is in flight.
    let mut loads = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warning!("Cannot read input: {}", e);
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let command = match SessionCommand::parse(&line) {
            Ok(c) => c,
            Err(e) => {
                warning!("{}", e);
                continue;
            }
        };

        match command {
            SessionCommand::Mood(tag) => {
                while loads.try_join_next().is_some() {}
                let player = Arc::clone(&player);
                loads.spawn(async move { select(&player, &tag).await });
            }
            SessionCommand::Play(index) => {
                if !player.play_track(index) {
                    warning!("There is no track {}", index + 1);
                }
            }
            SessionCommand::Toggle => player.toggle_playback(),
            SessionCommand::Resume => {
                player.resume();
            }
            SessionCommand::Next => {
                player.next_track();
            }
            SessionCommand::Previous => {
                player.previous_track();
            }
            SessionCommand::Pause => player.pause(),
            SessionCommand::Embed => {
                if !player.embed_current_fallback() {
                    warning!("No curated playlist on display");
                }
            }
            SessionCommand::Open(index) => open(&player, index),
            SessionCommand::Tracks => {
                let tracks = player.tracks();
                if tracks.is_empty() {
                    warning!("No tracks loaded");
                } else {
                    let rows = utils::track_table_rows(&tracks, player.state().current_index);
                    println!("{}", Table::new(rows));
                }
            }
            SessionCommand::Dismiss => player.notifications().dismiss(),
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Quit => break,
        }
    }

    loads.abort_all();
    player.shutdown();
}

async fn select(player: &MoodPlayerController, tag: &str) {
    match player.select_mood_tag(tag).await {
        LoadOutcome::Loaded(count) => log::debug!("Loaded {} tracks for '{}'", count, tag),
        LoadOutcome::Degraded(e) => log::debug!("Degraded load for '{}': {}", tag, e),
        LoadOutcome::Busy => warning!("Still loading the previous mood"),
    }
}

fn open(player: &MoodPlayerController, index: Option<usize>) {
    let link = match index {
        Some(i) => player.external_link(i),
        None => player
            .fallback_link()
            .or_else(|| player.state().current_index.and_then(|i| player.external_link(i))),
    };

    match link {
        Some(link) => {
            info!("Opening {}", link);
            if let Err(e) = webbrowser::open(&link) {
                warning!("Cannot open browser: {}", e);
            }
        }
        None => warning!("Nothing to open"),
    }
}
