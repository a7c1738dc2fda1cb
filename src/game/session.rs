//! The game session state machine.
//!
//! [`GameSession`] owns the round in progress and the scores that survive
//! across rounds. Its operations never perform I/O: anything that must reach
//! the outside world (fetching a riddle, saving a high score) is returned as
//! an [`Effect`] for the caller to execute.

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, info, instrument, warn};

use super::guess::Guess;
use super::hint::{HintCategory, MAX_HINTS};
use super::riddle::{Difficulty, RiddleContent};
use super::round::{FeedbackKind, RoundState, RoundStatus};
use crate::provider::GenerationError;

/// Points awarded for solving a riddle before hint penalties.
pub const POINTS_PER_CORRECT_ANSWER: i64 = 100;

/// Identifies one `start_round` call. Later rounds get larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("round#{_0}")]
pub struct RoundToken(u64);

/// Work the session asks its owner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a riddle and hand it back through [`GameSession::complete_fetch`].
    Fetch {
        /// Token the result must be delivered with.
        token: RoundToken,
        /// Requested difficulty.
        difficulty: Difficulty,
    },
    /// Persist a new best score.
    SaveHighScore(i64),
}

/// Result of an accepted operation plus the effects it produced.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Transition<T> {
    outcome: T,
    effects: Vec<Effect>,
}

impl<T> Transition<T> {
    fn new(outcome: T, effects: Vec<Effect>) -> Self {
        Self { outcome, effects }
    }

    /// Splits the transition into its outcome and effects.
    pub fn into_parts(self) -> (T, Vec<Effect>) {
        (self.outcome, self.effects)
    }
}

/// What an accepted guess did to the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The letter occurs in the title; the round continues.
    CorrectLetter(char),
    /// The letter does not occur in the title.
    IncorrectLetter(char),
    /// The full-title attempt did not match.
    WrongTitle,
    /// The round was won.
    Won {
        /// Points added to the current score (may be negative).
        points: i64,
        /// Whether the win produced a new high score.
        new_high_score: bool,
    },
}

/// What a completed fetch did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The riddle was installed and the round is playing.
    Ready,
    /// The fetch failed and the round is in the error state.
    Failed,
    /// The token belongs to an abandoned round; nothing changed.
    Stale,
}

/// A rejected request. The round is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum GuardViolation {
    /// Guesses and hints are only accepted while playing.
    #[display("not accepting input while {status}")]
    NotPlaying {
        /// Status at the time of the request.
        status: RoundStatus,
    },
    /// The submission was blank.
    #[display("enter a letter or a title")]
    EmptyGuess,
    /// The letter was guessed earlier this round.
    #[display("you already guessed '{letter}'")]
    AlreadyGuessed {
        /// The repeated letter.
        letter: char,
    },
    /// Hints must be unlocked in order.
    #[display("reveal the {expected} hint before the {requested} hint")]
    HintOutOfOrder {
        /// Category the player asked for.
        requested: HintCategory,
        /// Category that must be unlocked next.
        expected: HintCategory,
    },
    /// The hint is already visible.
    #[display("the {category} hint is already revealed")]
    HintAlreadyRevealed {
        /// The repeated category.
        category: HintCategory,
    },
    /// Every hint has been used.
    #[display("no more hints available for this riddle")]
    NoHintsRemaining,
}

/// A single-player game session.
#[derive(Debug, Clone, Default, Getters)]
pub struct GameSession {
    /// State of the round in progress.
    round: RoundState,
    /// Sum of points earned this session.
    current_score: i64,
    /// Best score known to the session.
    high_score: i64,
    /// Token of the most recent `start_round` call.
    #[getter(skip)]
    current_token: Option<RoundToken>,
    #[getter(skip)]
    issued_tokens: u64,
}

impl GameSession {
    /// Creates a session with no round started and a zero score.
    #[instrument]
    pub fn new(high_score: i64) -> Self {
        info!(high_score, "Creating game session");
        Self {
            high_score,
            ..Self::default()
        }
    }

    /// Current round status.
    pub fn status(&self) -> RoundStatus {
        *self.round.status()
    }

    /// Token of the round whose fetch is authoritative, if any was started.
    pub fn current_token(&self) -> Option<RoundToken> {
        self.current_token
    }

    /// Adopts a persisted high score. Never lowers the in-memory value.
    #[instrument(skip(self), fields(current = self.high_score))]
    pub fn restore_high_score(&mut self, value: i64) {
        if value > self.high_score {
            debug!(value, "Restoring persisted high score");
            self.high_score = value;
        }
    }

    /// Abandons the current round and begins loading a new one.
    ///
    /// Valid from any state. Returns the new round's token along with the
    /// fetch the caller must perform.
    #[instrument(skip(self), fields(previous = ?self.current_token, status = %self.status()))]
    pub fn start_round(&mut self, difficulty: Difficulty) -> Transition<RoundToken> {
        self.issued_tokens += 1;
        let token = RoundToken(self.issued_tokens);
        self.current_token = Some(token);
        self.round = RoundState::loading();

        info!(%token, %difficulty, "Round started, fetching riddle");
        Transition::new(token, vec![Effect::Fetch { token, difficulty }])
    }

    /// Delivers the result of the fetch issued for `token`.
    ///
    /// Results for any token other than the most recent one are dropped.
    #[instrument(skip(self, result), fields(current = ?self.current_token, ok = result.is_ok()))]
    pub fn complete_fetch(
        &mut self,
        token: RoundToken,
        result: Result<RiddleContent, GenerationError>,
    ) -> FetchOutcome {
        if self.current_token != Some(token) || self.status() != RoundStatus::Loading {
            debug!(%token, "Dropping stale riddle fetch");
            return FetchOutcome::Stale;
        }

        match result {
            Ok(riddle) => {
                info!(%token, "Riddle ready");
                self.round.set_riddle(Some(riddle));
                self.round.set_status(RoundStatus::Playing);
                FetchOutcome::Ready
            }
            Err(e) => {
                warn!(%token, error = %e, "Riddle fetch failed");
                self.round.set_riddle(None);
                self.round.set_status(RoundStatus::Error);
                self.round.set_feedback(
                    FeedbackKind::Error,
                    "Could not fetch a new riddle. Please try again.".to_string(),
                );
                FetchOutcome::Failed
            }
        }
    }

    /// Unlocks `category`, charging its penalty against this round's reward.
    ///
    /// # Errors
    ///
    /// Returns a [`GuardViolation`] if the round is not playing, the category
    /// is already unlocked, every hint is used, or an earlier hint is still
    /// locked.
    #[instrument(skip(self), fields(hints_used = self.round.hints_used()))]
    pub fn request_hint(&mut self, category: HintCategory) -> Result<HintCategory, GuardViolation> {
        self.ensure_playing()?;

        if self.round.is_hint_revealed(category) {
            return Err(GuardViolation::HintAlreadyRevealed { category });
        }
        let used = self.round.hints_used();
        if used >= MAX_HINTS {
            return Err(GuardViolation::NoHintsRemaining);
        }
        if category.position() != used {
            let expected = self
                .round
                .next_hint()
                .ok_or(GuardViolation::NoHintsRemaining)?;
            debug!(requested = %category, %expected, "Hint requested out of order");
            return Err(GuardViolation::HintOutOfOrder {
                requested: category,
                expected,
            });
        }

        self.round.unlock_hint(category);
        self.round.set_feedback(
            FeedbackKind::Info,
            format!(
                "Hint revealed: {} (-{} points).",
                category.label(),
                category.penalty()
            ),
        );
        info!(
            %category,
            penalty = self.round.penalty_accumulated(),
            "Hint unlocked"
        );
        Ok(category)
    }

    /// Unlocks whichever hint is next in order.
    ///
    /// # Errors
    ///
    /// Same as [`request_hint`](Self::request_hint).
    #[instrument(skip(self), fields(hints_used = self.round.hints_used()))]
    pub fn request_next_hint(&mut self) -> Result<HintCategory, GuardViolation> {
        self.ensure_playing()?;
        let category = self
            .round
            .next_hint()
            .ok_or(GuardViolation::NoHintsRemaining)?;
        self.request_hint(category)
    }

    /// Evaluates a guess: a single letter or digit, or the whole title.
    ///
    /// # Errors
    ///
    /// Returns a [`GuardViolation`] if the round is not playing, the input is
    /// blank, or the letter was already guessed.
    #[instrument(skip(self), fields(status = %self.status()))]
    pub fn submit_guess(&mut self, raw: &str) -> Result<Transition<GuessOutcome>, GuardViolation> {
        self.ensure_playing()?;
        let guess = Guess::classify(raw).ok_or(GuardViolation::EmptyGuess)?;
        if let Guess::Letter(letter) = guess {
            if self.round.revealed_letters().contains(&letter) {
                debug!(%letter, "Letter already guessed");
                return Err(GuardViolation::AlreadyGuessed { letter });
            }
        }

        let riddle = match self.round.riddle() {
            Some(riddle) => riddle.clone(),
            None => {
                return Err(GuardViolation::NotPlaying {
                    status: self.status(),
                });
            }
        };

        self.round.set_status(RoundStatus::Loading);
        debug!(?guess, "Evaluating guess");

        let transition = match guess {
            Guess::Letter(letter) => {
                self.round.record_letter(letter);
                if !riddle.contains_letter(letter) {
                    self.round.set_feedback(
                        FeedbackKind::Info,
                        format!("No '{}' in the title.", letter),
                    );
                    self.round.set_status(RoundStatus::Playing);
                    Transition::new(GuessOutcome::IncorrectLetter(letter), Vec::new())
                } else if riddle.is_revealed_by(self.round.revealed_letters()) {
                    self.win(&riddle)
                } else {
                    self.round.set_feedback(
                        FeedbackKind::Info,
                        format!("Good guess! '{}' is in the title.", letter),
                    );
                    self.round.set_status(RoundStatus::Playing);
                    Transition::new(GuessOutcome::CorrectLetter(letter), Vec::new())
                }
            }
            Guess::Title(attempt) => {
                if riddle.matches_title(&attempt) {
                    self.round.reveal_all();
                    self.win(&riddle)
                } else {
                    self.round.set_feedback(
                        FeedbackKind::Error,
                        "That's not it. Try again or use a hint!".to_string(),
                    );
                    self.round.set_status(RoundStatus::Playing);
                    Transition::new(GuessOutcome::WrongTitle, Vec::new())
                }
            }
        };

        info!(outcome = ?transition.outcome(), status = %self.status(), "Guess evaluated");
        Ok(transition)
    }

    /// Disclosure text of every unlocked hint, in reveal order.
    #[instrument(skip(self))]
    pub fn revealed_hints(&self) -> Vec<(HintCategory, String)> {
        use strum::IntoEnumIterator;

        HintCategory::iter()
            .filter_map(|category| {
                self.round
                    .hint_text(category)
                    .map(|text| (category, text))
            })
            .collect()
    }

    fn ensure_playing(&self) -> Result<(), GuardViolation> {
        match self.status() {
            RoundStatus::Playing => Ok(()),
            status => {
                debug!(%status, "Rejecting input outside of play");
                Err(GuardViolation::NotPlaying { status })
            }
        }
    }

    fn win(&mut self, riddle: &RiddleContent) -> Transition<GuessOutcome> {
        let points = POINTS_PER_CORRECT_ANSWER - self.round.penalty_accumulated();
        self.current_score += points;

        let mut effects = Vec::new();
        let new_high_score = self.current_score > self.high_score;
        if new_high_score {
            info!(
                previous = self.high_score,
                high_score = self.current_score,
                "New high score"
            );
            self.high_score = self.current_score;
            effects.push(Effect::SaveHighScore(self.high_score));
        }

        self.round.set_status(RoundStatus::Answered);
        self.round.set_feedback(
            FeedbackKind::Success,
            format!(
                "You earned {} points! The movie was \"{}\".",
                points,
                riddle.title()
            ),
        );
        info!(title = %riddle.title(), points, score = self.current_score, "Round won");

        Transition::new(
            GuessOutcome::Won {
                points,
                new_high_score,
            },
            effects,
        )
    }
}
