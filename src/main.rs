//! CineSage - Unified CLI
//!
//! Movie riddle guessing game with several modes of operation.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::Result;
use cinesage::{
    DeckRiddleProvider, GameConfig, GameController, LlmClient, LlmRiddleProvider,
    MemoryScoreStore, RiddleProvider, ScoreRepository, ScoreStore, tui,
};
use clap::Parser;
use cli::{Cli, Command, SourceArgs};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = GameConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Play {
            source,
            db_path,
            no_persist,
        } => run_play(config, source, db_path, no_persist).await,
        Command::Riddle { source } => run_riddle(config, source).await,
        Command::HighScore { db_path, reset } => run_high_score(config, db_path, reset),
    }
}

/// Run the terminal game
async fn run_play(
    config: GameConfig,
    source: SourceArgs,
    db_path: Option<String>,
    no_persist: bool,
) -> Result<()> {
    // Log to a file so output does not corrupt the terminal
    let log_file = std::fs::File::create(tui::TUI_LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,cinesage=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    let config = apply_overrides(config, &source, db_path);
    let provider = build_provider(&config)?;

    let store: Arc<dyn ScoreStore> = if no_persist {
        info!("High score kept in memory only");
        Arc::new(MemoryScoreStore::new())
    } else {
        match ScoreRepository::open(config.db_path().clone()) {
            Ok(repository) => Arc::new(repository),
            Err(e) => {
                warn!(error = %e, "High score database unavailable, keeping scores in memory");
                Arc::new(MemoryScoreStore::new())
            }
        }
    };

    let controller = GameController::new(provider, store, *config.difficulty());
    tui::run_tui(controller).await
}

/// Generate a single riddle and print it
async fn run_riddle(config: GameConfig, source: SourceArgs) -> Result<()> {
    initialize_tracing();

    let config = apply_overrides(config, &source, None);
    let provider = build_provider(&config)?;

    info!(difficulty = %config.difficulty(), "Generating riddle");
    let riddle = provider.generate(*config.difficulty()).await?;
    println!("{}", serde_json::to_string_pretty(&riddle)?);
    Ok(())
}

/// Show or reset the saved high score
fn run_high_score(config: GameConfig, db_path: Option<String>, reset: bool) -> Result<()> {
    initialize_tracing();

    let db_path = db_path.unwrap_or_else(|| config.db_path().clone());
    let repository = ScoreRepository::open(db_path)?;

    if reset {
        let removed = repository.clear()?;
        println!(
            "{}",
            if removed {
                "High score erased."
            } else {
                "No high score saved."
            }
        );
        return Ok(());
    }

    match repository.get()? {
        Some(row) => println!(
            "High score: {} (set {})",
            row.value(),
            row.updated_at().format("%Y-%m-%d %H:%M")
        ),
        None => println!("No high score saved."),
    }
    Ok(())
}

#[instrument(skip_all)]
fn apply_overrides(config: GameConfig, source: &SourceArgs, db_path: Option<String>) -> GameConfig {
    let mut config = config;
    if let Some(difficulty) = source.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(deck) = &source.deck {
        config = config.with_deck(deck.clone());
    }
    if let Some(db_path) = db_path {
        config = config.with_db_path(db_path);
    }
    config
}

#[instrument(skip_all, fields(deck = ?config.deck()))]
fn build_provider(config: &GameConfig) -> Result<Arc<dyn RiddleProvider>> {
    if let Some(deck) = config.deck() {
        info!(path = %deck.display(), "Serving riddles from deck");
        return Ok(Arc::new(DeckRiddleProvider::from_file(deck)?));
    }

    let llm_config = config.create_llm_config()?;
    info!(model = %llm_config.model(), "Serving riddles from language model");
    Ok(Arc::new(LlmRiddleProvider::new(LlmClient::new(llm_config))))
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,cinesage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
