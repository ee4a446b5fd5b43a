use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The six moods the player knows how to serve.
///
/// Every variant must have an entry in the [`crate::catalog::MoodCatalog`];
/// the catalog refuses to build otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Calm,
    Focused,
    Motivated,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Calm,
        Mood::Focused,
        Mood::Motivated,
    ];

    /// The lowercase tag used on the wire and in mood buttons.
    pub fn tag(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Calm => "calm",
            Mood::Focused => "focused",
            Mood::Motivated => "motivated",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mood '{0}'")]
pub struct UnknownMood(pub String);

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.tag() == needle)
            .ok_or(UnknownMood(s.to_string()))
    }
}

/// What the user actually picked: one of the known moods, or a free-form tag
/// that is served through the generic search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodSelection {
    Known(Mood),
    Unlisted(String),
}

impl MoodSelection {
    /// Parses a tag, keeping unrecognised tags as [`MoodSelection::Unlisted`].
    pub fn parse(tag: &str) -> Self {
        match tag.parse::<Mood>() {
            Ok(mood) => MoodSelection::Known(mood),
            Err(_) => MoodSelection::Unlisted(tag.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            MoodSelection::Known(mood) => mood.tag(),
            MoodSelection::Unlisted(tag) => tag,
        }
    }

    pub fn known(&self) -> Option<Mood> {
        match self {
            MoodSelection::Known(mood) => Some(*mood),
            MoodSelection::Unlisted(_) => None,
        }
    }
}

impl From<Mood> for MoodSelection {
    fn from(mood: Mood) -> Self {
        MoodSelection::Known(mood)
    }
}

impl fmt::Display for MoodSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
