pub mod json_store;
pub mod kv;
pub mod leaderboard;
pub mod schema;

pub use kv::{KeyValueStore, MemoryStore, StoreError};
