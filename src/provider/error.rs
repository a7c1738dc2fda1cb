//! Riddle generation error.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::llm_client::LlmError;

/// The riddle source could not produce valid content.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Generation error: {} at {}:{}", message, file, line)]
pub struct GenerationError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GenerationError {
    /// Creates a new generation error with caller location tracking.
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

impl From<LlmError> for GenerationError {
    #[track_caller]
    fn from(err: LlmError) -> Self {
        Self::new(format!("Upstream model unavailable: {}", err.message))
    }
}

impl From<serde_json::Error> for GenerationError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Malformed riddle payload: {}", err))
    }
}
