//! High score record
//!
//! A single persisted scalar. Read when the result scene opens, written only
//! when a match beats it.

use serde::{Deserialize, Serialize};

use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::{IntegerStore, StoreError};

/// The best score ever recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScoreRecord {
    pub value: u64,
}

/// Outcome of submitting a finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    /// High score to display after the submission
    pub record: HighScoreRecord,
    /// Whether the submitted score beat the old record
    pub is_new: bool,
}

impl HighScoreRecord {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Whether a score would replace this record
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.value
    }

    /// Load from a store; negative stored values read as zero
    pub fn load(store: &dyn IntegerStore) -> Result<Self, StoreError> {
        let raw = store.get_integer(HIGH_SCORE_KEY)?;
        Ok(Self::new(raw.max(0) as u64))
    }

    /// Persist this record
    pub fn save(&self, store: &mut dyn IntegerStore) -> Result<(), StoreError> {
        let value = i64::try_from(self.value).unwrap_or(i64::MAX);
        store.set_integer(HIGH_SCORE_KEY, value)
    }

    /// Compare a finished match against the stored record, writing it back if beaten.
    ///
    /// Store failures never lose the match result: an unreadable record counts
    /// as zero and a failed write still reports the new high score.
    pub fn submit(store: &mut dyn IntegerStore, score: u64) -> Submission {
        let stored = Self::load(store).unwrap_or_else(|e| {
            log::warn!("Could not read high score: {}", e);
            Self::default()
        });

        if !stored.beaten_by(score) {
            return Submission {
                record: stored,
                is_new: false,
            };
        }

        let record = Self::new(score);
        match record.save(store) {
            Ok(()) => log::info!("New high score: {} (was {})", score, stored.value),
            Err(e) => log::warn!("Could not save high score {}: {}", score, e),
        }
        Submission {
            record,
            is_new: true,
        }
    }
}
