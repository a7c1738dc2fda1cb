//! CineSage library - movie riddle guessing game
//!
//! A riddle describing a movie is fetched from a [`RiddleProvider`]. The
//! player guesses single letters to uncover the title hangman-style, or
//! guesses the whole title, and may buy hints (cast, year, director) in a
//! fixed order at a point cost.
//!
//! # Architecture
//!
//! - **Game**: the [`GameSession`] state machine; pure, returns [`Effect`]s
//! - **Providers**: riddles from a language model or a TOML deck
//! - **Store**: best-score persistence (SQLite or in-memory)
//! - **Controller**: executes effects and applies fetch results
//!
//! # Example
//!
//! ```
//! use cinesage::{Difficulty, Effect, FetchOutcome, GameSession, RiddleContent};
//!
//! let mut session = GameSession::new(0);
//! let (token, effects) = session.start_round(Difficulty::Easy).into_parts();
//! assert!(matches!(effects[0], Effect::Fetch { .. }));
//!
//! let riddle = RiddleContent::new(
//!     "Two detectives, one box.".to_string(),
//!     "Seven".to_string(),
//!     vec!["Brad Pitt".to_string(), "Morgan Freeman".to_string()],
//!     "1995".to_string(),
//!     "David Fincher".to_string(),
//! )
//! .unwrap();
//! assert_eq!(session.complete_fetch(token, Ok(riddle)), FetchOutcome::Ready);
//!
//! session.submit_guess("seven").unwrap();
//! assert_eq!(*session.current_score(), 100);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod db;
mod game;
pub mod llm_client;
mod provider;
mod store;
pub mod tui;

// Crate-level exports - Game rules
pub use game::{
    Difficulty, Effect, Feedback, FeedbackKind, FetchOutcome, GameSession, GuardViolation, Guess,
    GuessOutcome, HintCategory, MAX_HINTS, MASK_CHAR, POINTS_PER_CORRECT_ANSWER, RiddleContent,
    RoundState, RoundStatus, RoundToken, Transition,
};

// Crate-level exports - Riddle providers
pub use provider::{
    DeckRiddleProvider, GenerationError, LlmRiddleProvider, RiddleProvider, parse_riddle,
};

// Crate-level exports - Score persistence
pub use db::{DbError, DbErrorKind, HighScore, NewHighScore, ScoreRepository};
pub use store::{HIGH_SCORE_KEY, MemoryScoreStore, ScoreStore, StoreError};

// Crate-level exports - Configuration and orchestration
pub use config::{ConfigError, GameConfig};
pub use controller::{FetchCompleted, GameController};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};
