//! SQLite persistence for high scores.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{DbError, DbErrorKind};
pub use models::{HighScore, NewHighScore};
pub use repository::ScoreRepository;
