//! Riddles generated by a hosted language model.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use super::{GenerationError, RiddleProvider};
use crate::game::{Difficulty, RiddleContent};
use crate::llm_client::LlmClient;

const SYSTEM_PROMPT: &str = "You are an expert movie riddle creator. \
Your task is to generate a challenging movie riddle based on the specified difficulty level. \
The riddle should be creative, engaging, and require a deep understanding of movie plots, \
characters, and trivia. Never mention the title in the riddle. \
Respond with a single JSON object and nothing else.";

/// Asks a [`LlmClient`] for a riddle and validates the reply.
#[derive(Debug, Clone)]
pub struct LlmRiddleProvider {
    client: LlmClient,
}

impl LlmRiddleProvider {
    /// Creates a provider backed by `client`.
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Builds the user message for `difficulty`.
    pub fn prompt(difficulty: Difficulty) -> String {
        let obscurity = match difficulty {
            Difficulty::Easy | Difficulty::Medium => {
                "Pick a well-known film and keep the clues fair."
            }
            Difficulty::Hard | Difficulty::Expert => {
                "Make the riddle significantly more obscure, indirect, \
                 or based on subtle details of the movie."
            }
        };

        format!(
            "Difficulty level: {difficulty}\n\
             {obscurity}\n\n\
             Return JSON with exactly these fields:\n\
             - \"riddle\": the riddle text\n\
             - \"movieTitle\": the title of the movie\n\
             - \"cast\": a list of 2-3 main actors, e.g. [\"Actor One\", \"Actor Two\"]\n\
             - \"year\": the release year as a string, e.g. \"1999\"\n\
             - \"director\": the director's name"
        )
    }
}

#[async_trait]
impl RiddleProvider for LlmRiddleProvider {
    #[instrument(skip(self), fields(model = %self.client.config().model()))]
    async fn generate(&self, difficulty: Difficulty) -> Result<RiddleContent, GenerationError> {
        debug!("Requesting riddle from model");
        let reply = self
            .client
            .complete(SYSTEM_PROMPT, &Self::prompt(difficulty))
            .await?;

        let riddle = parse_riddle(&reply).inspect_err(|e| {
            warn!(error = %e, reply_length = reply.len(), "Model reply rejected");
        })?;
        info!(title_length = riddle.title().len(), "Riddle generated");
        Ok(riddle)
    }
}

/// Parses a model reply into validated riddle content.
///
/// Tolerates markdown code fences and prose around the JSON object.
///
/// # Errors
///
/// Returns [`GenerationError`] if no JSON object is found or the object does
/// not describe a playable riddle.
pub fn parse_riddle(reply: &str) -> Result<RiddleContent, GenerationError> {
    let start = reply
        .find('{')
        .ok_or_else(|| GenerationError::new("reply contains no JSON object"))?;
    let end = reply
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| GenerationError::new("reply contains an unterminated JSON object"))?;

    Ok(serde_json::from_str(&reply[start..=end])?)
}
