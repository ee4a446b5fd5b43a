//! Configuration management for moodplayer.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every value has a default, so the player
//! runs against a local backend without any configuration at all.
//!
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, path::PathBuf, time::Duration};

pub const API_URL_VAR: &str = "MOODPLAYER_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "MOODPLAYER_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from `moodplayer/.env` in the local data directory.
///
/// The directory is created when it does not exist yet. A missing `.env` file
/// is fine; defaults apply in that case.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/moodplayer/.env`
/// - macOS: `~/Library/Application Support/moodplayer/.env`
/// - Windows: `%LOCALAPPDATA%/moodplayer/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        log::debug!("No env file at {}, using defaults", path.display());
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodplayer/.env");
    path
}

/// Runtime settings for talking to the recommendation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Blank or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup(API_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_url);

        let request_timeout = lookup(REQUEST_TIMEOUT_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            api_url,
            request_timeout,
        }
    }
}

/// Timer offsets for notifications and the delayed benefit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Delay between creating a notification and sliding it in.
    pub show_delay: Duration,
    /// Length of the slide-out before a hidden notification is removed.
    pub hide_transition: Duration,
    pub default_display: Duration,
    pub benefit_delay: Duration,
    pub benefit_display: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            show_delay: Duration::from_millis(100),
            hide_transition: Duration::from_millis(300),
            default_display: Duration::from_millis(4000),
            benefit_delay: Duration::from_millis(2000),
            benefit_display: Duration::from_millis(6000),
        }
    }
}
