//! Best score across sessions
//!
//! Stored as a plain decimal string under `streamyHighScore`.

use crate::consts::HIGH_SCORE_KEY;
use crate::platform::KeyValueStore;

/// Parse a stored high score. Absent, blank or non-numeric values yield `None`.
pub fn parse_stored(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<u64>().ok()
}

/// High score held in memory and mirrored to a store
pub struct HighScoreRecord<S: KeyValueStore> {
    store: S,
    best: u64,
}

impl<S: KeyValueStore> HighScoreRecord<S> {
    /// Read the stored value, ignoring anything unparsable
    pub fn load(store: S) -> Self {
        let stored = store.get(HIGH_SCORE_KEY);
        let best = match parse_stored(stored.as_deref()) {
            Some(best) => {
                log::info!("Loaded high score {}", best);
                best
            }
            None => {
                if let Some(raw) = stored {
                    log::warn!("Ignoring unreadable stored high score {:?}", raw);
                }
                0
            }
        };
        Self { store, best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Offer a score. Returns the new best if it beat the old one.
    ///
    /// The in-memory value updates even if the durable write fails.
    pub fn submit(&mut self, score: u64) -> Option<u64> {
        if score <= self.best {
            return None;
        }
        self.best = score;
        if let Err(e) = self.store.set(HIGH_SCORE_KEY, &score.to_string()) {
            log::warn!("High score {} not saved: {}", score, e);
        } else {
            log::info!("New high score {}", score);
        }
        Some(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryStore, StorageError};

    #[test]
    fn test_parse_stored() {
        assert_eq!(parse_stored(None), None);
        assert_eq!(parse_stored(Some("")), None);
        assert_eq!(parse_stored(Some("   ")), None);
        assert_eq!(parse_stored(Some("abc")), None);
        assert_eq!(parse_stored(Some("-3")), None);
        assert_eq!(parse_stored(Some("30")), Some(30));
        assert_eq!(parse_stored(Some(" 42\n")), Some(42));
    }

    #[test]
    fn test_load_defaults_to_zero() {
        let record = HighScoreRecord::load(MemoryStore::new());
        assert_eq!(record.best(), 0);

        let record = HighScoreRecord::load(MemoryStore::with_entry(HIGH_SCORE_KEY, "NaN"));
        assert_eq!(record.best(), 0);
    }

    #[test]
    fn test_new_high_score_is_persisted() {
        let mut record = HighScoreRecord::load(MemoryStore::with_entry(HIGH_SCORE_KEY, "30"));
        assert_eq!(record.best(), 30);

        assert_eq!(record.submit(12), None);
        assert_eq!(record.submit(30), None);
        assert_eq!(record.store().get(HIGH_SCORE_KEY).as_deref(), Some("30"));

        assert_eq!(record.submit(42), Some(42));
        assert_eq!(record.best(), 42);
        assert_eq!(record.store().get(HIGH_SCORE_KEY).as_deref(), Some("42"));
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_failed_write_still_updates_memory() {
        let mut record = HighScoreRecord::load(FailingStore);
        assert_eq!(record.submit(5), Some(5));
        assert_eq!(record.best(), 5);
    }
}
