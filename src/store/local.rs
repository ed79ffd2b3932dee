//! Local file-backed persistence.
//!
//! The local backend keeps all state for one account under a single
//! directory as two fixed-key entries: the full record collection and the
//! pricing configuration, each serialized as one JSON block. The collection
//! is not individually addressable at the storage layer — every mutation
//! reads the whole block, rewrites it and writes it back. An absent entry is
//! treated as an empty collection or the default configuration.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::calculation::compute_income;
use crate::error::{EngineError, EngineResult};
use crate::models::{PricingConfig, ShiftDraft, ShiftRecord};

use super::{ConfigStore, RecordStore};

/// Fixed key under which the record collection is stored.
pub const RECORDS_KEY: &str = "driver_pay_records_v1.json";

/// Fixed key under which the pricing configuration is stored.
pub const SETTINGS_KEY: &str = "driver_pay_settings_v1.json";

/// File-backed store holding one account's records and configuration.
///
/// # Example
///
/// ```no_run
/// use driver_pay_engine::store::LocalStore;
///
/// let store = LocalStore::open("./data/accounts/1")?;
/// # Ok::<(), driver_pay_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Opens (creating if necessary) the store directory for one account.
    pub fn open<P: Into<PathBuf>>(root: P) -> EngineResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(EngineError::persistence)?;
        Ok(Self { root })
    }

    fn records_path(&self) -> PathBuf {
        self.root.join(RECORDS_KEY)
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_KEY)
    }

    /// Reads and deserializes one fixed-key entry, or yields the default
    /// when the key is absent.
    fn read_entry<T: serde::de::DeserializeOwned + Default>(path: &Path) -> EngineResult<T> {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(EngineError::persistence),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(T::default()),
            Err(err) => Err(EngineError::persistence(err)),
        }
    }

    /// Serializes and rewrites one fixed-key entry as a whole block.
    fn write_entry<T: serde::Serialize>(path: &Path, value: &T) -> EngineResult<()> {
        let content = serde_json::to_string(value).map_err(EngineError::persistence)?;
        fs::write(path, content).map_err(EngineError::persistence)?;
        debug!(path = %path.display(), "Rewrote storage entry");
        Ok(())
    }

    /// Removes one fixed-key entry; an already-absent key is fine.
    fn remove_entry(path: &Path) -> EngineResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(EngineError::persistence(err)),
        }
    }

    fn read_records(&self) -> EngineResult<Vec<ShiftRecord>> {
        Self::read_entry(&self.records_path())
    }
}

impl RecordStore for LocalStore {
    async fn create(&self, draft: ShiftDraft) -> EngineResult<ShiftRecord> {
        let pricing: PricingConfig = Self::read_entry(&self.settings_path())?;
        let record = ShiftRecord {
            id: Uuid::new_v4().to_string(),
            total_income: compute_income(&draft.kind, &pricing),
            date: draft.date,
            kind: draft.kind,
        };

        // Newest first, so same-date records keep creation recency.
        let mut records = self.read_records()?;
        records.insert(0, record.clone());
        Self::write_entry(&self.records_path(), &records)?;

        Ok(record)
    }

    async fn list_by_month(&self, year: i32, month: u32) -> EngineResult<Vec<ShiftRecord>> {
        let mut records: Vec<ShiftRecord> = self
            .read_records()?
            .into_iter()
            .filter(|record| record.falls_in(year, month))
            .collect();
        // Stable sort: date descending, ties keep stored (newest-first) order.
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn delete_by_id(&self, id: &str) -> EngineResult<()> {
        let mut records = self.read_records()?;
        let position = records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| EngineError::NotFound { id: id.to_string() })?;
        records.remove(position);
        Self::write_entry(&self.records_path(), &records)
    }

    async fn wipe_all(&self) -> EngineResult<()> {
        Self::remove_entry(&self.records_path())?;
        Self::remove_entry(&self.settings_path())
    }
}

impl ConfigStore for LocalStore {
    async fn get(&self) -> EngineResult<PricingConfig> {
        Self::read_entry(&self.settings_path())
    }

    async fn save(&self, config: PricingConfig) -> EngineResult<()> {
        Self::write_entry(&self.settings_path(), &config)
    }
}
