use colored::Colorize;
use tabled::Table;

use crate::{
    info,
    render::{NotificationPhase, PlayerView, RenderPort, RenderResult},
    success,
    types::{FallbackPlaylist, Notification, Severity, Track},
    utils, warning,
};

/// Renders the player into the terminal.
///
/// The terminal has no play button or player panel to reveal; those regions
/// keep the default "missing" behaviour and the controller skips them.
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl RenderPort for TerminalRenderer {
    fn highlight_mood(&self, mood: &str) -> RenderResult {
        println!("{} {}", "Mood:".bold(), mood.magenta().bold());
        Ok(())
    }

    fn render_status(&self, text: &str) -> RenderResult {
        info!("{}", text);
        Ok(())
    }

    fn render_tracks(&self, tracks: &[Track]) -> RenderResult {
        println!("{}", Table::new(utils::track_table_rows(tracks, None)));
        Ok(())
    }

    fn render_fallback(&self, playlist: &FallbackPlaylist, mood: &str) -> RenderResult {
        println!();
        println!("  {}", playlist.name.bold().purple());
        println!("  {}", playlist.description);
        println!("  Open: {}", playlist.url.underline());
        println!(
            "  {}",
            format!("Curated playlist for {} therapy sessions. Type `embed` to play here.", mood)
                .dimmed()
        );
        println!();
        Ok(())
    }

    fn render_now_playing(&self, track: &Track) -> RenderResult {
        println!(
            "{} {} {} {}",
            "♪".green().bold(),
            track.display_name().bold(),
            "by".dimmed(),
            track.artist_names()
        );
        Ok(())
    }

    fn render_player(&self, view: &PlayerView) -> RenderResult {
        match view {
            PlayerView::Preview { url, title } => {
                println!("  Preview of {}: {}", title.bold(), url.underline());
                println!("  {}", "30-second preview".dimmed());
            }
            PlayerView::TrackEmbed { embed_url } | PlayerView::PlaylistEmbed { embed_url } => {
                println!("  Player: {}", embed_url.underline());
            }
            PlayerView::TrackInfo {
                title,
                artists,
                link,
            } => {
                println!("  {} by {}", title.bold(), artists);
                match link {
                    Some(link) => println!("  Full track: {}", link.underline()),
                    None => println!("  {}", "No preview or player available".dimmed()),
                }
            }
        }
        Ok(())
    }

    fn stop_audio(&self) -> RenderResult {
        Ok(())
    }

    fn render_queue(&self, tracks: &[Track], current: usize) -> RenderResult {
        for (i, track) in tracks.iter().enumerate() {
            let line = format!(
                "{:>3}. {} - {} ({})",
                i + 1,
                track.display_name(),
                track.artist_names(),
                track.formatted_duration()
            );
            if i == current {
                println!("{} {}", ">".purple().bold(), line.purple());
            } else {
                println!("  {}", line.dimmed());
            }
        }
        Ok(())
    }

    fn render_listen_time(&self, units: u32) -> RenderResult {
        println!("{}", format!("Tracks started this session: {}", units).dimmed());
        Ok(())
    }

    fn render_notification(
        &self,
        notification: &Notification,
        phase: NotificationPhase,
    ) -> RenderResult {
        // A terminal cannot take text back, so only the slide-in is printed.
        if phase != NotificationPhase::Shown {
            return Ok(());
        }
        match notification.severity {
            Severity::Success => success!("{}", notification.text),
            Severity::Warning => warning!("{}", notification.text),
            Severity::Info => info!("{}", notification.text),
        }
        Ok(())
    }
}
