//! In-process score store.

use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use super::{ScoreStore, StoreError};

/// Keeps the best score in memory. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: Arc<Mutex<Option<i64>>>,
    fail_saves: bool,
}

impl MemoryScoreStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value`.
    pub fn with_value(value: i64) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value))),
            fail_saves: false,
        }
    }

    /// Creates a store whose saves always fail, for exercising the
    /// non-fatal persistence path.
    pub fn failing() -> Self {
        Self {
            value: Arc::default(),
            fail_saves: true,
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    #[instrument(skip(self))]
    fn load(&self) -> Result<Option<i64>, StoreError> {
        let value = *self
            .value
            .lock()
            .map_err(|_| StoreError::new("score lock poisoned"))?;
        debug!(?value, "Loaded high score from memory");
        Ok(value)
    }

    #[instrument(skip(self))]
    fn save(&self, value: i64) -> Result<(), StoreError> {
        if self.fail_saves {
            return Err(StoreError::new("saving is disabled for this store"));
        }
        let mut slot = self
            .value
            .lock()
            .map_err(|_| StoreError::new("score lock poisoned"))?;
        *slot = Some(value);
        debug!(value, "Saved high score in memory");
        Ok(())
    }
}
