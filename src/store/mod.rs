//! Persistence contracts and their two backends.
//!
//! [`RecordStore`] and [`ConfigStore`] are the capability interfaces the
//! rest of the system talks to. Two implementations exist — the local
//! file-backed [`LocalStore`] and the remote HTTP [`RemoteStore`] — and
//! they satisfy the same contract: identical creation semantics (the store
//! assigns the id and snapshots the income), identical month listing order,
//! and identical not-found behavior on delete. [`StoreBackend`] selects one
//! of them once at startup so call sites never branch on the backend.

mod cache;
mod local;
mod remote;

pub use cache::{ConfigCache, CONFIG_CACHE_TTL};
pub use local::{LocalStore, RECORDS_KEY, SETTINGS_KEY};
pub use remote::RemoteStore;

use crate::error::EngineResult;
use crate::models::{PricingConfig, ShiftDraft, ShiftRecord};

/// CRUD contract for shift records.
///
/// The store is authoritative: it assigns the record id and computes the
/// income snapshot from the pricing in force at save time, so the
/// `total_income` invariant holds no matter which backend is selected.
#[allow(async_fn_in_trait)]
pub trait RecordStore {
    /// Persists a new record built from the draft, returning it with its
    /// assigned id and income snapshot.
    async fn create(&self, draft: ShiftDraft) -> EngineResult<ShiftRecord>;

    /// Returns the records of one calendar month, date descending, creation
    /// ties newest first. An empty month is an empty vec, never an error.
    async fn list_by_month(&self, year: i32, month: u32) -> EngineResult<Vec<ShiftRecord>>;

    /// Deletes one record; a nonexistent id is a
    /// [`NotFound`](crate::error::EngineError::NotFound) error.
    async fn delete_by_id(&self, id: &str) -> EngineResult<()>;

    /// Removes every record and the configuration for the identity.
    /// Irreversible; performs no confirmation of its own.
    async fn wipe_all(&self) -> EngineResult<()>;
}

/// CRUD contract for the pricing configuration.
#[allow(async_fn_in_trait)]
pub trait ConfigStore {
    /// Returns the configuration, or the all-zero defaults if never set.
    async fn get(&self) -> EngineResult<PricingConfig>;

    /// Replaces the configuration wholesale.
    async fn save(&self, config: PricingConfig) -> EngineResult<()>;
}

/// The backend chosen once at startup.
///
/// Call sites hold this enum and stay backend-agnostic; there is no runtime
/// branching on locality anywhere else.
pub enum StoreBackend {
    /// File-backed per-account storage.
    Local(LocalStore),
    /// HTTP client of the remote authoritative service.
    Remote(RemoteStore),
}

impl RecordStore for StoreBackend {
    async fn create(&self, draft: ShiftDraft) -> EngineResult<ShiftRecord> {
        match self {
            StoreBackend::Local(store) => store.create(draft).await,
            StoreBackend::Remote(store) => store.create(draft).await,
        }
    }

    async fn list_by_month(&self, year: i32, month: u32) -> EngineResult<Vec<ShiftRecord>> {
        match self {
            StoreBackend::Local(store) => store.list_by_month(year, month).await,
            StoreBackend::Remote(store) => store.list_by_month(year, month).await,
        }
    }

    async fn delete_by_id(&self, id: &str) -> EngineResult<()> {
        match self {
            StoreBackend::Local(store) => store.delete_by_id(id).await,
            StoreBackend::Remote(store) => store.delete_by_id(id).await,
        }
    }

    async fn wipe_all(&self) -> EngineResult<()> {
        match self {
            StoreBackend::Local(store) => store.wipe_all().await,
            StoreBackend::Remote(store) => store.wipe_all().await,
        }
    }
}

impl ConfigStore for StoreBackend {
    async fn get(&self) -> EngineResult<PricingConfig> {
        match self {
            StoreBackend::Local(store) => store.get().await,
            StoreBackend::Remote(store) => store.get().await,
        }
    }

    async fn save(&self, config: PricingConfig) -> EngineResult<()> {
        match self {
            StoreBackend::Local(store) => store.save(config).await,
            StoreBackend::Remote(store) => store.save(config).await,
        }
    }
}
