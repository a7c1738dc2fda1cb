//! Database models for persisted scores.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// A stored best score.
#[derive(Debug, Clone, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::high_scores)]
#[diesel(primary_key(score_key))]
pub struct HighScore {
    score_key: String,
    value: i64,
    updated_at: NaiveDateTime,
}

/// Row written when a best score is saved. Replaces any row with the same key.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::high_scores)]
pub struct NewHighScore {
    score_key: String,
    value: i64,
    updated_at: NaiveDateTime,
}
