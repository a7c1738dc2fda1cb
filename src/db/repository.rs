//! SQLite-backed [`ScoreStore`].

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbErrorKind, HighScore, NewHighScore, schema};
use crate::store::{HIGH_SCORE_KEY, ScoreStore, StoreError};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Reads and writes best scores in a SQLite database.
#[derive(Debug, Clone)]
pub struct ScoreRepository {
    db_path: String,
    score_key: String,
}

impl ScoreRepository {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations as needed.
    ///
    /// Use `":memory:"` only for one-off checks: every call opens a fresh
    /// connection, so an in-memory database does not outlive it.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, DbError> {
        let repository = Self {
            db_path,
            score_key: HIGH_SCORE_KEY.to_string(),
        };

        let mut conn = repository.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migrate, e.to_string()))?;
        info!(applied = applied.len(), "ScoreRepository ready");

        Ok(repository)
    }

    /// Stores scores under `score_key` instead of the default key.
    pub fn with_key(mut self, score_key: impl Into<String>) -> Self {
        self.score_key = score_key.into();
        self
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        Ok(SqliteConnection::establish(&self.db_path)?)
    }

    /// Returns the stored row for this repository's key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(key = %self.score_key))]
    pub fn get(&self) -> Result<Option<HighScore>, DbError> {
        let mut conn = self.connection()?;

        let row = schema::high_scores::table
            .filter(schema::high_scores::score_key.eq(&self.score_key))
            .select(HighScore::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = row.is_some(), "High score looked up");
        Ok(row)
    }

    /// Replaces the stored value for this repository's key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(key = %self.score_key))]
    pub fn put(&self, value: i64) -> Result<(), DbError> {
        let mut conn = self.connection()?;

        let row = NewHighScore::new(
            self.score_key.clone(),
            value,
            chrono::Utc::now().naive_utc(),
        );
        diesel::replace_into(schema::high_scores::table)
            .values(&row)
            .execute(&mut conn)?;

        info!(value, "High score stored");
        Ok(())
    }

    /// Removes the stored value for this repository's key.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(key = %self.score_key))]
    pub fn clear(&self) -> Result<bool, DbError> {
        let mut conn = self.connection()?;

        let deleted = diesel::delete(
            schema::high_scores::table.filter(schema::high_scores::score_key.eq(&self.score_key)),
        )
        .execute(&mut conn)?;

        info!(deleted, "High score cleared");
        Ok(deleted > 0)
    }
}

impl ScoreStore for ScoreRepository {
    fn load(&self) -> Result<Option<i64>, StoreError> {
        Ok(self.get()?.map(|row| *row.value()))
    }

    fn save(&self, value: i64) -> Result<(), StoreError> {
        Ok(self.put(value)?)
    }
}
