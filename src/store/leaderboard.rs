use log::warn;

use crate::store::kv::{HIGH_SCORE_KEY, KeyValueStore, LEADERBOARD_KEY};

pub const DEFAULT_CAPACITY: usize = 3;

/// Top-K scores kept in the persistence collaborator, highest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaderboardStore {
    capacity: usize,
}

impl Default for LeaderboardStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl LeaderboardStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current entries. An unreadable store reads as an empty board, and
    /// whatever was persisted is re-sorted and bounded before use.
    pub fn entries(&self, store: &dyn KeyValueStore) -> Vec<u32> {
        let raw = match store.get_ordered_ints(LEADERBOARD_KEY, &[]) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("leaderboard unavailable, showing empty board: {e}");
                Vec::new()
            }
        };
        let mut entries: Vec<u32> = raw
            .into_iter()
            .filter_map(|v| u32::try_from(v).ok())
            .collect();
        self.normalize(&mut entries);
        entries
    }

    /// Insert `score`, keep the top entries and persist them. Equal scores
    /// are separate entries. The returned board is valid even when the
    /// write fails.
    pub fn record(&self, store: &mut dyn KeyValueStore, score: u32) -> Vec<u32> {
        let mut entries = self.entries(store);
        entries.push(score);
        self.normalize(&mut entries);

        let persisted: Vec<i64> = entries.iter().map(|&v| i64::from(v)).collect();
        if let Err(e) = store.set_ordered_ints(LEADERBOARD_KEY, &persisted) {
            warn!("failed to persist leaderboard: {e}");
        }
        entries
    }

    fn normalize(&self, entries: &mut Vec<u32>) {
        entries.sort_unstable_by(|a, b| b.cmp(a));
        entries.truncate(self.capacity);
    }
}

pub fn load_high_score(store: &dyn KeyValueStore) -> u32 {
    match store.get_int(HIGH_SCORE_KEY, 0) {
        Ok(v) => u32::try_from(v).unwrap_or(0),
        Err(e) => {
            warn!("high score unavailable, assuming 0: {e}");
            0
        }
    }
}

pub fn save_high_score(store: &mut dyn KeyValueStore, value: u32) {
    if let Err(e) = store.set_int(HIGH_SCORE_KEY, i64::from(value)) {
        warn!("failed to persist high score {value}: {e}");
    }
}
