//! Sources of riddle content.

mod deck;
mod error;
mod llm;

pub use deck::DeckRiddleProvider;
pub use error::GenerationError;
pub use llm::{LlmRiddleProvider, parse_riddle};

use async_trait::async_trait;

use crate::game::{Difficulty, RiddleContent};

/// Produces riddles on demand.
#[async_trait]
pub trait RiddleProvider: Send + Sync {
    /// Produces a riddle at the given difficulty.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] when the upstream source is unavailable or
    /// returns content that is not a playable riddle.
    async fn generate(&self, difficulty: Difficulty) -> Result<RiddleContent, GenerationError>;
}
