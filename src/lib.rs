//! Mood Player Library
//!
//! This library drives a mood-based music session: the user picks a mood, the
//! player fetches a matching playlist from a recommendation backend, and then
//! plays previews or embeds a third-party player. When the backend fails or
//! has nothing to offer, a curated fallback playlist is shown instead.
//!
//! # Modules
//!
//! - `backend` - Track retrieval contract and its HTTP implementation
//! - `catalog` - Validated mood configuration table
//! - `cli` - Terminal front-end
//! - `config` - Configuration management and environment variables
//! - `controller` - The mood player state machine
//! - `errors` - Typed errors
//! - `management` - Notification and timer bookkeeping
//! - `mood` - The mood enum and selection parsing
//! - `render` - Display port the controller writes to
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use moodplayer::{backend::HttpTrackSource, catalog::MoodCatalog, config, controller::MoodPlayerController, mood::Mood};
//!
//! #[tokio::main]
//! async fn main() -> moodplayer::Res<()> {
//!     let settings = config::Settings::from_env();
//!     let source = Arc::new(HttpTrackSource::new(&settings)?);
//!     let port = Arc::new(moodplayer::cli::TerminalRenderer::new());
//!     let player = MoodPlayerController::new(MoodCatalog::builtin()?, source, port, Default::default());
//!     player.select_mood(Mood::Calm).await;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod controller;
pub mod errors;
pub mod management;
pub mod mood;
pub mod render;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the edges of the application (startup, the binary) where any error
/// type may surface. Keeps `Send + Sync` bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Finding therapeutic {} music...", "calm");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable startup failures; the player itself never calls it.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
