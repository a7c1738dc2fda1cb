//! Command-line interface for cinesage.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use cinesage::Difficulty;

/// CineSage - guess the movie behind the riddle
#[derive(Parser, Debug)]
#[command(name = "cinesage")]
#[command(about = "Movie riddle guessing game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = "cinesage.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Where riddles come from, overriding the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Riddle difficulty
    #[arg(short, long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Serve riddles from a TOML deck instead of the language model
    #[arg(long)]
    pub deck: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Riddle source overrides
        #[command(flatten)]
        source: SourceArgs,

        /// Path to the high score database
        #[arg(long)]
        db_path: Option<String>,

        /// Keep the high score in memory only
        #[arg(long)]
        no_persist: bool,
    },

    /// Generate one riddle and print it as JSON
    Riddle {
        /// Riddle source overrides
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show the saved high score
    HighScore {
        /// Path to the high score database
        #[arg(long)]
        db_path: Option<String>,

        /// Erase the saved high score
        #[arg(long)]
        reset: bool,
    },
}
