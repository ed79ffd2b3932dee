//! Application state for the driver pay API.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::EngineResult;
use crate::store::LocalStore;

/// Shared application state.
///
/// Holds the storage root under which each account's data lives, and the
/// write lock that serializes mutations of the per-account storage blocks
/// (the local store rewrites a whole collection per mutation, so concurrent
/// writers must not interleave).
#[derive(Clone)]
pub struct AppState {
    root: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates application state rooted at the given storage directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Opens the store scoped to one account id.
    pub fn store_for(&self, account_id: i64) -> EngineResult<LocalStore> {
        LocalStore::open(self.root.join(account_id.to_string()))
    }

    /// Returns the lock serializing storage mutations.
    pub(crate) fn write_lock(&self) -> &Mutex<()> {
        &self.write_lock
    }
}
