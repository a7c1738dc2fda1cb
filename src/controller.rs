//! Drives a [`GameSession`] against real collaborators.
//!
//! The session decides; the controller performs what it asks for. Fetches run
//! on tokio tasks and report back over a channel tagged with their round
//! token, so a slow fetch for an abandoned round is simply dropped by the
//! session when it finally arrives.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::game::{
    Difficulty, Effect, FetchOutcome, GameSession, GuardViolation, GuessOutcome, HintCategory,
    RiddleContent, RoundToken,
};
use crate::provider::{GenerationError, RiddleProvider};
use crate::store::ScoreStore;

/// A riddle fetch that has finished, successfully or not.
#[derive(Debug)]
pub struct FetchCompleted {
    token: RoundToken,
    result: Result<RiddleContent, GenerationError>,
}

/// Owns a session together with its riddle source and score store.
pub struct GameController {
    session: GameSession,
    provider: Arc<dyn RiddleProvider>,
    store: Arc<dyn ScoreStore>,
    difficulty: Difficulty,
    pending_save: Option<i64>,
    fetch_tx: mpsc::UnboundedSender<FetchCompleted>,
    fetch_rx: mpsc::UnboundedReceiver<FetchCompleted>,
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("session", &self.session)
            .field("difficulty", &self.difficulty)
            .field("pending_save", &self.pending_save)
            .finish_non_exhaustive()
    }
}

impl GameController {
    /// Creates a controller, seeding the high score from `store`.
    ///
    /// A store that cannot be read is logged and treated as empty.
    #[instrument(skip(provider, store))]
    pub fn new(
        provider: Arc<dyn RiddleProvider>,
        store: Arc<dyn ScoreStore>,
        difficulty: Difficulty,
    ) -> Self {
        let mut session = GameSession::new(0);
        match store.load() {
            Ok(Some(value)) => session.restore_high_score(value),
            Ok(None) => debug!("No saved high score"),
            Err(e) => warn!(error = %e, "Could not load high score, starting from zero"),
        }

        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        info!(high_score = session.high_score(), "Game controller ready");
        Self {
            session,
            provider,
            store,
            difficulty,
            pending_save: None,
            fetch_tx,
            fetch_rx,
        }
    }

    /// The session being driven.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Difficulty used for new rounds.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// High score that the store has not accepted yet.
    pub fn pending_save(&self) -> Option<i64> {
        self.pending_save
    }

    /// Changes the difficulty of subsequent rounds.
    #[instrument(skip(self))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Starts a new round and kicks off its fetch. Must be called inside a
    /// tokio runtime.
    ///
    /// A high score whose earlier save failed is retried first.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn start_round(&mut self) -> RoundToken {
        if let Some(value) = self.pending_save {
            debug!(value, "Retrying unsaved high score");
            self.persist(value);
        }
        let (token, effects) = self.session.start_round(self.difficulty).into_parts();
        self.run_effects(effects);
        token
    }

    /// Unlocks a specific hint.
    ///
    /// # Errors
    ///
    /// Returns the session's [`GuardViolation`] unchanged.
    #[instrument(skip(self))]
    pub fn request_hint(&mut self, category: HintCategory) -> Result<HintCategory, GuardViolation> {
        self.session.request_hint(category)
    }

    /// Unlocks the next hint in order.
    ///
    /// # Errors
    ///
    /// Returns the session's [`GuardViolation`] unchanged.
    #[instrument(skip(self))]
    pub fn request_next_hint(&mut self) -> Result<HintCategory, GuardViolation> {
        self.session.request_next_hint()
    }

    /// Submits a guess and persists any new high score.
    ///
    /// # Errors
    ///
    /// Returns the session's [`GuardViolation`] unchanged.
    #[instrument(skip(self))]
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, GuardViolation> {
        let (outcome, effects) = self.session.submit_guess(raw)?.into_parts();
        self.run_effects(effects);
        Ok(outcome)
    }

    /// Waits for the next fetch to finish and applies it.
    #[instrument(skip(self))]
    pub async fn next_fetch(&mut self) -> Option<FetchOutcome> {
        let completed = self.fetch_rx.recv().await?;
        Some(self.apply(completed))
    }

    /// Applies fetches until one is not stale.
    #[instrument(skip(self))]
    pub async fn settle(&mut self) -> FetchOutcome {
        loop {
            match self.next_fetch().await {
                Some(FetchOutcome::Stale) => continue,
                Some(outcome) => return outcome,
                None => return FetchOutcome::Stale,
            }
        }
    }

    /// Applies every fetch that has already finished, without waiting.
    #[instrument(skip(self))]
    pub fn try_apply_fetches(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(completed) = self.fetch_rx.try_recv() {
            outcomes.push(self.apply(completed));
        }
        outcomes
    }

    #[instrument(skip(self, completed), fields(token = %completed.token))]
    fn apply(&mut self, completed: FetchCompleted) -> FetchOutcome {
        let FetchCompleted { token, result } = completed;
        self.session.complete_fetch(token, result)
    }

    /// Saves `value`, keeping it as pending if the store refuses.
    ///
    /// Synchronous: blocks the caller for one store write.
    #[instrument(skip(self))]
    fn persist(&mut self, value: i64) {
        match self.store.save(value) {
            Ok(()) => {
                if self.pending_save.take().is_some() {
                    info!(value, "Unsaved high score persisted");
                }
            }
            Err(e) => {
                warn!(error = %e, value, "High score not persisted, will retry next round");
                self.pending_save = Some(value);
            }
        }
    }

    #[instrument(skip(self, effects), fields(count = effects.len()))]
    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { token, difficulty } => {
                    let provider = Arc::clone(&self.provider);
                    let tx = self.fetch_tx.clone();
                    debug!(%token, "Spawning riddle fetch");
                    tokio::spawn(async move {
                        let result = provider.generate(difficulty).await;
                        if tx.send(FetchCompleted { token, result }).is_err() {
                            debug!(%token, "Controller dropped before fetch finished");
                        }
                    });
                }
                Effect::SaveHighScore(value) => self.persist(value),
            }
        }
    }
}
