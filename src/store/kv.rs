use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

pub const HIGH_SCORE_KEY: &str = "high_score";
pub const LEADERBOARD_KEY: &str = "leaderboard";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize scores: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistent key-value service holding the high score and leaderboard.
///
/// Absent keys yield the caller's default. Implementations report failures;
/// deciding what a failure means is left to the caller.
pub trait KeyValueStore {
    fn get_int(&self, key: &str, default: i64) -> Result<i64, StoreError>;
    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
    fn get_ordered_ints(&self, key: &str, default: &[i64]) -> Result<Vec<i64>, StoreError>;
    fn set_ordered_ints(&mut self, key: &str, values: &[i64]) -> Result<(), StoreError>;
}

/// Volatile store, used for `--ephemeral` runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    ints: HashMap<String, i64>,
    sequences: HashMap<String, Vec<i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str, default: i64) -> Result<i64, StoreError> {
        Ok(self.ints.get(key).copied().unwrap_or(default))
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.ints.insert(key.to_string(), value);
        Ok(())
    }

    fn get_ordered_ints(&self, key: &str, default: &[i64]) -> Result<Vec<i64>, StoreError> {
        Ok(self
            .sequences
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_vec()))
    }

    fn set_ordered_ints(&mut self, key: &str, values: &[i64]) -> Result<(), StoreError> {
        self.sequences.insert(key.to_string(), values.to_vec());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_int(&self, key: &str, default: i64) -> Result<i64, StoreError> {
        (**self).get_int(key, default)
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        (**self).set_int(key, value)
    }

    fn get_ordered_ints(&self, key: &str, default: &[i64]) -> Result<Vec<i64>, StoreError> {
        (**self).get_ordered_ints(key, default)
    }

    fn set_ordered_ints(&mut self, key: &str, values: &[i64]) -> Result<(), StoreError> {
        (**self).set_ordered_ints(key, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_yield_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.get_int(HIGH_SCORE_KEY, 7).unwrap(), 7);
        assert_eq!(
            store.get_ordered_ints(LEADERBOARD_KEY, &[1, 2]).unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_set_then_get() {
        let mut store = MemoryStore::new();
        store.set_int(HIGH_SCORE_KEY, 120).unwrap();
        store.set_ordered_ints(LEADERBOARD_KEY, &[90, 40]).unwrap();
        assert_eq!(store.get_int(HIGH_SCORE_KEY, 0).unwrap(), 120);
        assert_eq!(
            store.get_ordered_ints(LEADERBOARD_KEY, &[]).unwrap(),
            vec![90, 40]
        );
    }

    #[test]
    fn test_boxed_store_forwards() {
        let mut store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set_int("k", 3).unwrap();
        assert_eq!(store.get_int("k", 0).unwrap(), 3);
    }
}
