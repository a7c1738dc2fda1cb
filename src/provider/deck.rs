//! Riddles served from a prepared TOML deck.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{GenerationError, RiddleProvider};
use crate::game::{Difficulty, ReleaseYear, RiddleContent};

#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    riddles: Vec<DeckEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeckEntry {
    riddle: String,
    movie_title: String,
    cast: Vec<String>,
    year: ReleaseYear,
    director: String,
    #[serde(default)]
    difficulty: Option<Difficulty>,
}

/// Cycles through a fixed list of riddles.
///
/// Entries tagged with a difficulty are only served for that difficulty;
/// untagged entries are served for any. If nothing matches, the whole deck
/// is used.
#[derive(Debug, Default)]
pub struct DeckRiddleProvider {
    entries: Vec<(Option<Difficulty>, RiddleContent)>,
    cursor: AtomicUsize,
}

impl DeckRiddleProvider {
    /// Creates a deck of untagged riddles.
    pub fn new(riddles: Vec<RiddleContent>) -> Self {
        Self {
            entries: riddles.into_iter().map(|riddle| (None, riddle)).collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Parses a deck from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the text is not valid TOML or any entry
    /// is not a playable riddle.
    #[instrument(skip(text), fields(len = text.len()))]
    pub fn from_toml_str(text: &str) -> Result<Self, GenerationError> {
        let deck: DeckFile = toml::from_str(text)
            .map_err(|e| GenerationError::new(format!("Failed to parse deck: {}", e)))?;

        let entries = deck
            .riddles
            .into_iter()
            .map(|entry| {
                let riddle = RiddleContent::new(
                    entry.riddle,
                    entry.movie_title,
                    entry.cast,
                    ReleaseYear::into_text(Some(entry.year)),
                    entry.director,
                )?;
                Ok((entry.difficulty, riddle))
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        info!(count = entries.len(), "Deck loaded");
        Ok(Self {
            entries,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Reads a deck from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GenerationError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GenerationError::new(format!("Failed to read deck: {}", e)))?;
        Self::from_toml_str(&text)
    }

    /// Number of riddles in the deck.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the deck has no riddles.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl RiddleProvider for DeckRiddleProvider {
    #[instrument(skip(self), fields(deck_size = self.entries.len()))]
    async fn generate(&self, difficulty: Difficulty) -> Result<RiddleContent, GenerationError> {
        let matching: Vec<&RiddleContent> = self
            .entries
            .iter()
            .filter(|(tag, _)| tag.is_none_or(|tag| tag == difficulty))
            .map(|(_, riddle)| riddle)
            .collect();
        let candidates: Vec<&RiddleContent> = if matching.is_empty() {
            self.entries.iter().map(|(_, riddle)| riddle).collect()
        } else {
            matching
        };

        if candidates.is_empty() {
            return Err(GenerationError::new("riddle deck is empty"));
        }

        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % candidates.len();
        debug!(index, candidates = candidates.len(), "Dealing riddle from deck");
        Ok(candidates[index].clone())
    }
}
