//! Integration tests against hosted models. Run with `--features api`.

use cinesage::llm_client::{LlmClient, LlmConfig, LlmProvider};
use cinesage::{Difficulty, LlmRiddleProvider, RiddleProvider};
use tracing::instrument;

fn client_from_env(provider: LlmProvider) -> LlmClient {
    dotenvy::dotenv().ok();

    let config = LlmConfig::from_env(provider, provider.default_model().to_string(), 512)
        .expect("API key not set");
    LlmClient::new(config)
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_anthropic_connectivity() {
    let client = client_from_env(LlmProvider::Anthropic);

    let response = client
        .complete("You are a helpful assistant.", "Say 'Hello, world!' and nothing else.")
        .await
        .expect("Failed to complete");

    assert!(!response.is_empty(), "Response should not be empty");
    eprintln!("Response: {}", response);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_connectivity() {
    let client = client_from_env(LlmProvider::OpenAI);

    let response = client
        .complete("You are a helpful assistant.", "Say 'Hello, world!' and nothing else.")
        .await
        .expect("Failed to complete");

    assert!(!response.is_empty(), "Response should not be empty");
    eprintln!("Response: {}", response);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_generates_playable_riddle() {
    let provider = LlmRiddleProvider::new(client_from_env(LlmProvider::OpenAI));

    let riddle = provider
        .generate(Difficulty::Easy)
        .await
        .expect("Failed to generate riddle");

    assert!(!riddle.required_letters().is_empty());
    assert!(!riddle.cast().is_empty());
    eprintln!("Riddle: {} ({})", riddle.riddle_text(), riddle.title());
}
