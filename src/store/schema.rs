use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// On-disk document backing [`crate::store::json_store::JsonStore`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoresData {
    pub schema_version: u32,
    #[serde(default)]
    pub ints: BTreeMap<String, i64>,
    #[serde(default)]
    pub sequences: BTreeMap<String, Vec<i64>>,
}

impl Default for ScoresData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            ints: BTreeMap::new(),
            sequences: BTreeMap::new(),
        }
    }
}

impl ScoresData {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
