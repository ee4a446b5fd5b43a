//! The mood configuration table.
//!
//! Each [`Mood`] maps to a backend endpoint path, a curated fallback playlist
//! and a short benefit message. The table is checked once when it is built:
//! a missing or incomplete entry is a startup error, never a runtime surprise.

use std::collections::BTreeMap;

use crate::{
    errors::CatalogError,
    mood::{Mood, MoodSelection},
    types::{FallbackPlaylist, MoodTableRow},
    utils,
};

pub const GENERIC_BENEFIT: &str = "Music therapy supports emotional wellness and mental health.";

/// Fallback used for moods outside the table.
pub const UNLISTED_FALLBACK_MOOD: Mood = Mood::Calm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodEntry {
    pub mood: Mood,
    pub endpoint: String,
    pub fallback: FallbackPlaylist,
    pub benefit: String,
}

impl MoodEntry {
    fn builtin(
        mood: Mood,
        endpoint: &str,
        name: &str,
        description: &str,
        playlist_id: &str,
        benefit: &str,
    ) -> Self {
        Self {
            mood,
            endpoint: endpoint.to_string(),
            fallback: FallbackPlaylist {
                name: name.to_string(),
                description: description.to_string(),
                url: utils::playlist_url(playlist_id),
                embed: utils::playlist_embed_url(playlist_id),
            },
            benefit: benefit.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoodCatalog {
    entries: BTreeMap<Mood, MoodEntry>,
}

impl MoodCatalog {
    /// Builds a catalog, insisting on exactly one complete entry per mood.
    pub fn new(entries: Vec<MoodEntry>) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.endpoint.trim().is_empty() {
                return Err(CatalogError::MissingEndpoint(entry.mood));
            }
            if !entry.fallback.is_complete() {
                return Err(CatalogError::MissingFallback(entry.mood));
            }
            let mood = entry.mood;
            if map.insert(mood, entry).is_some() {
                return Err(CatalogError::DuplicateEntry(mood));
            }
        }

        if let Some(missing) = Mood::ALL.into_iter().find(|m| !map.contains_key(m)) {
            return Err(CatalogError::MissingEntry(missing));
        }

        Ok(Self { entries: map })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(builtin_entries())
    }

    pub fn entry(&self, mood: Mood) -> &MoodEntry {
        // `new` guarantees every mood is present.
        &self.entries[&mood]
    }

    pub fn entries(&self) -> impl Iterator<Item = &MoodEntry> {
        self.entries.values()
    }

    pub fn endpoint(&self, selection: &MoodSelection) -> String {
        match selection {
            MoodSelection::Known(mood) => self.entry(*mood).endpoint.clone(),
            MoodSelection::Unlisted(tag) => utils::search_path(tag),
        }
    }

    pub fn fallback(&self, selection: &MoodSelection) -> &FallbackPlaylist {
        let mood = selection.known().unwrap_or(UNLISTED_FALLBACK_MOOD);
        &self.entry(mood).fallback
    }

    pub fn benefit(&self, selection: &MoodSelection) -> &str {
        match selection {
            MoodSelection::Known(mood) => &self.entry(*mood).benefit,
            MoodSelection::Unlisted(_) => GENERIC_BENEFIT,
        }
    }

    pub fn table_rows(&self) -> Vec<MoodTableRow> {
        self.entries()
            .map(|e| MoodTableRow {
                mood: e.mood.to_string(),
                endpoint: e.endpoint.clone(),
                fallback: e.fallback.name.clone(),
            })
            .collect()
    }
}

pub fn builtin_entries() -> Vec<MoodEntry> {
    vec![
        MoodEntry::builtin(
            Mood::Happy,
            "/api/music/mood-enhanced?mood=happy",
            "Happy Therapy Music",
            "Uplifting songs to boost your mood and energy",
            "37i9dQZF1DX0XUsuxWHRQd",
            "Uplifting music releases endorphins and dopamine, naturally enhancing your joy and positive emotions.",
        ),
        MoodEntry::builtin(
            Mood::Sad,
            "/api/music/mood-enhanced?mood=sad",
            "Gentle Healing Music",
            "Soothing tracks to help process difficult emotions",
            "37i9dQZF1DX3Ogo9pFvBkY",
            "Gentle, reflective music helps process difficult emotions and provides comfort during challenging times.",
        ),
        MoodEntry::builtin(
            Mood::Anxious,
            "/api/music/crisis-intervention",
            "Calming Music for Anxiety",
            "Peaceful sounds to reduce anxiety and stress",
            "37i9dQZF1DWZqd5JICZI0u",
            "Calming rhythms and frequencies can effectively lower cortisol levels and reduce anxiety symptoms.",
        ),
        MoodEntry::builtin(
            Mood::Calm,
            "/api/music/sleep-therapy",
            "Peaceful Meditation Music",
            "Serene melodies for relaxation and mindfulness",
            "37i9dQZF1DX4sWSpwAYIy1",
            "Peaceful melodies synchronize with your relaxed state, promoting deeper mindfulness and inner peace.",
        ),
        MoodEntry::builtin(
            Mood::Focused,
            "/api/music/study-focus",
            "Focus & Concentration",
            "Instrumental music to enhance productivity",
            "37i9dQZF1DWZeKCadgRdKQ",
            "Instrumental music enhances concentration by providing optimal background stimulation for cognitive tasks.",
        ),
        MoodEntry::builtin(
            Mood::Motivated,
            "/api/music/mood-enhanced?mood=energetic",
            "Motivational Music",
            "Energetic tracks to boost motivation and drive",
            "37i9dQZF1DX76Wlfdnj7AP",
            "Energetic beats increase adrenaline and motivation, perfect for achieving your goals and staying driven.",
        ),
    ]
}
