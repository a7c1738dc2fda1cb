//! Score database errors.

use derive_more::{Display, Error};
use tracing::instrument;

use crate::store::StoreError;

/// Stage of a score database operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// The SQLite file could not be opened.
    #[display("connect")]
    Connect,
    /// Embedded migrations could not be applied.
    #[display("migrate")]
    Migrate,
    /// A read or write against `high_scores` failed.
    #[display("query")]
    Query,
}

/// Score database failure with the call site that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Score database {} failed: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failed stage.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error for `kind`, recording the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connect, err.to_string())
    }
}

impl From<DbError> for StoreError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        StoreError::new(format!("{} failed: {}", err.kind, err.message))
    }
}
