use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::warn;

use crate::store::kv::{KeyValueStore, StoreError};
use crate::store::schema::ScoresData;

const SCORES_FILE: &str = "scores.json";

/// File-backed store: one JSON document in the data directory, rewritten
/// atomically on every set.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(Self::default_dir())
    }

    /// `<data_dir>/quickmath`, also home to the log file.
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quickmath")
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self) -> PathBuf {
        self.base_dir.join(SCORES_FILE)
    }

    /// Missing file is an empty document. A document from another schema
    /// version is discarded rather than misread.
    fn load(&self) -> Result<ScoresData, StoreError> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(ScoresData::default());
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let data: ScoresData =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?;
        if data.needs_reset() {
            warn!(
                "ignoring {} with schema version {}",
                path.display(),
                data.schema_version
            );
            return Ok(ScoresData::default());
        }
        Ok(data)
    }

    fn save(&self, data: &ScoresData) -> Result<(), StoreError> {
        let path = self.file_path();
        let tmp_path = path.with_extension("tmp");
        let io_err = |source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        fs::rename(&tmp_path, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Read-modify-write. An unreadable document is replaced; I/O errors are
    /// reported without touching the file.
    fn update(&self, apply: impl FnOnce(&mut ScoresData)) -> Result<(), StoreError> {
        let mut data = match self.load() {
            Ok(data) => data,
            Err(StoreError::Corrupt { path, source }) => {
                warn!("replacing unreadable {}: {source}", path.display());
                ScoresData::default()
            }
            Err(e) => return Err(e),
        };
        apply(&mut data);
        self.save(&data)
    }
}

impl KeyValueStore for JsonStore {
    fn get_int(&self, key: &str, default: i64) -> Result<i64, StoreError> {
        Ok(self.load()?.ints.get(key).copied().unwrap_or(default))
    }

    fn set_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.update(|data| {
            data.ints.insert(key.to_string(), value);
        })
    }

    fn get_ordered_ints(&self, key: &str, default: &[i64]) -> Result<Vec<i64>, StoreError> {
        Ok(self
            .load()?
            .sequences
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_vec()))
    }

    fn set_ordered_ints(&mut self, key: &str, values: &[i64]) -> Result<(), StoreError> {
        self.update(|data| {
            data.sequences.insert(key.to_string(), values.to_vec());
        })
    }
}
