//! Persistence of the player's best score.

mod memory;

pub use memory::MemoryScoreStore;

use derive_more::{Display, Error};
use tracing::instrument;

/// Fixed key under which the best score is stored.
pub const HIGH_SCORE_KEY: &str = "cinesage_high_score";

/// Loads and saves the best score.
///
/// Failures are never fatal to a game: callers keep playing on the
/// in-memory value.
pub trait ScoreStore: Send + Sync {
    /// Returns the saved best score, or `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn load(&self) -> Result<Option<i64>, StoreError>;

    /// Saves `value` as the best score.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn save(&self, value: i64) -> Result<(), StoreError>;
}

/// Score persistence error.
#[derive(Debug, Clone, Display, Error)]
#[display("Score store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
