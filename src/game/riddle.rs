//! Riddle content produced by a [`RiddleProvider`](crate::RiddleProvider).

use std::collections::BTreeSet;

use clap::ValueEnum;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::instrument;

use crate::provider::GenerationError;

/// Placeholder shown for letters the player has not revealed yet.
pub const MASK_CHAR: char = '_';

/// How obscure the generated riddle should be.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Well-known films, direct clues.
    Easy,
    /// Popular films, indirect clues.
    Medium,
    /// Obscure details of the plot.
    #[default]
    Hard,
    /// Deep trivia.
    Expert,
}

impl Difficulty {
    /// Lowercase name as sent to the generator.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw shape of a riddle as the generator emits it, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRiddle {
    #[serde(default)]
    riddle: String,
    #[serde(default)]
    movie_title: String,
    #[serde(default)]
    cast: Vec<String>,
    #[serde(default)]
    year: Option<ReleaseYear>,
    #[serde(default)]
    director: String,
}

/// Release year as written by a generator or deck: text or a bare number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ReleaseYear {
    Text(String),
    Number(i64),
}

impl ReleaseYear {
    /// Year as text. A missing year becomes empty and fails validation.
    pub(crate) fn into_text(year: Option<Self>) -> String {
        match year {
            Some(Self::Text(text)) => text,
            Some(Self::Number(n)) => n.to_string(),
            None => String::new(),
        }
    }
}

/// A validated movie riddle. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRiddle")]
pub struct RiddleContent {
    /// The puzzle prompt.
    #[serde(rename = "riddle")]
    riddle_text: String,
    /// The secret answer.
    #[serde(rename = "movieTitle")]
    title: String,
    /// Leading actors.
    cast: Vec<String>,
    /// Release year.
    year: String,
    /// Director's name.
    director: String,
}

impl RiddleContent {
    /// Validates and builds riddle content.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the riddle or title is blank, the title
    /// has no ASCII alphanumeric character, the cast is empty, or the year or
    /// director is missing.
    #[instrument(skip_all, fields(title = %title))]
    pub fn new(
        riddle_text: String,
        title: String,
        cast: Vec<String>,
        year: String,
        director: String,
    ) -> Result<Self, GenerationError> {
        let riddle_text = riddle_text.trim().to_string();
        let title = title.trim().to_string();
        let cast: Vec<String> = cast
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        let year = year.trim().to_string();
        let director = director.trim().to_string();

        if riddle_text.is_empty() {
            return Err(GenerationError::new("riddle text is empty"));
        }
        if !title.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(GenerationError::new(format!(
                "title '{}' has no letters or digits to guess",
                title
            )));
        }
        if cast.is_empty() {
            return Err(GenerationError::new("cast is empty"));
        }
        if year.is_empty() {
            return Err(GenerationError::new("year is missing"));
        }
        if director.is_empty() {
            return Err(GenerationError::new("director is missing"));
        }

        Ok(Self {
            riddle_text,
            title,
            cast,
            year,
            director,
        })
    }

    /// Distinct uppercase alphanumeric characters the player must reveal.
    pub fn required_letters(&self) -> BTreeSet<char> {
        self.title
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }

    /// Whether `revealed` covers every alphanumeric character of the title.
    pub fn is_revealed_by(&self, revealed: &BTreeSet<char>) -> bool {
        self.required_letters().is_subset(revealed)
    }

    /// Whether the uppercased title contains `letter`.
    pub fn contains_letter(&self, letter: char) -> bool {
        let letter = letter.to_ascii_uppercase();
        self.title
            .chars()
            .any(|c| c.to_ascii_uppercase() == letter)
    }

    /// Case-insensitive comparison against a full-title attempt.
    pub fn matches_title(&self, attempt: &str) -> bool {
        attempt.trim().to_uppercase() == self.title.to_uppercase()
    }

    /// Renders the title with unrevealed alphanumerics replaced by [`MASK_CHAR`].
    ///
    /// Spaces and punctuation are always shown.
    pub fn masked_title(&self, revealed: &BTreeSet<char>) -> String {
        self.title
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() && !revealed.contains(&c.to_ascii_uppercase()) {
                    MASK_CHAR
                } else {
                    c
                }
            })
            .collect()
    }
}

impl TryFrom<RawRiddle> for RiddleContent {
    type Error = GenerationError;

    fn try_from(raw: RawRiddle) -> Result<Self, Self::Error> {
        let year = ReleaseYear::into_text(raw.year);
        Self::new(raw.riddle, raw.movie_title, raw.cast, year, raw.director)
    }
}
