//! Per-round state, discarded wholesale when a new round starts.

use std::collections::BTreeSet;

use derive_getters::Getters;
use derive_more::Display;
use derive_new::new;
use serde::{Deserialize, Serialize};

use super::hint::{HintCategory, MAX_HINTS};
use super::riddle::RiddleContent;

/// Lifecycle of a single round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    /// A riddle fetch is outstanding, or a guess is being evaluated.
    #[default]
    #[display("loading")]
    Loading,
    /// Accepting guesses and hint requests.
    #[display("playing")]
    Playing,
    /// The title was guessed; waiting for the next round.
    #[display("answered")]
    Answered,
    /// The riddle could not be fetched; waiting for a retry.
    #[display("error")]
    Error,
}

/// Tone of a feedback message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// The round was won.
    Success,
    /// A wrong title or a failed fetch.
    Error,
    /// Letter results and hint reveals.
    Info,
}

/// Last message shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new, Serialize, Deserialize)]
pub struct Feedback {
    kind: FeedbackKind,
    message: String,
}

/// Mutable state of the round in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters)]
pub struct RoundState {
    riddle: Option<RiddleContent>,
    revealed_letters: BTreeSet<char>,
    hints_revealed: [bool; MAX_HINTS],
    penalty_accumulated: i64,
    status: RoundStatus,
    feedback: Option<Feedback>,
}

impl RoundState {
    /// Fresh state for a round whose riddle is still being fetched.
    pub fn loading() -> Self {
        Self::default()
    }

    /// Number of hints unlocked so far.
    pub fn hints_used(&self) -> usize {
        self.hints_revealed.iter().filter(|revealed| **revealed).count()
    }

    /// Whether `category` has been unlocked.
    pub fn is_hint_revealed(&self, category: HintCategory) -> bool {
        self.hints_revealed[category.position()]
    }

    /// The next hint in reveal order, if any remain.
    pub fn next_hint(&self) -> Option<HintCategory> {
        HintCategory::at(self.hints_used())
    }

    /// Disclosure text of `category`, present only once it is unlocked.
    pub fn hint_text(&self, category: HintCategory) -> Option<String> {
        if !self.is_hint_revealed(category) {
            return None;
        }
        self.riddle.as_ref().map(|riddle| category.disclosure(riddle))
    }

    /// Title with unrevealed letters masked, or `None` while loading.
    pub fn masked_title(&self) -> Option<String> {
        self.riddle
            .as_ref()
            .map(|riddle| riddle.masked_title(&self.revealed_letters))
    }

    pub(super) fn set_status(&mut self, status: RoundStatus) {
        self.status = status;
    }

    pub(super) fn set_feedback(&mut self, kind: FeedbackKind, message: String) {
        self.feedback = Some(Feedback::new(kind, message));
    }

    pub(super) fn set_riddle(&mut self, riddle: Option<RiddleContent>) {
        self.riddle = riddle;
    }

    /// Records `letter`; returns false if it was already recorded.
    pub(super) fn record_letter(&mut self, letter: char) -> bool {
        self.revealed_letters.insert(letter)
    }

    pub(super) fn reveal_all(&mut self) {
        if let Some(riddle) = &self.riddle {
            self.revealed_letters.extend(riddle.required_letters());
        }
    }

    pub(super) fn unlock_hint(&mut self, category: HintCategory) {
        self.hints_revealed[category.position()] = true;
        self.penalty_accumulated += category.penalty();
    }
}
