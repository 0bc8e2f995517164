//! Lock-free in-memory database store.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;

use tidemark_core::Operation;
use tidemark_remote::{ApiError, DatabaseApi, DatabaseInfo};

pub type StorageKey = String; // Format: "cluster_id/name"

fn make_key(cluster_id: &str, name: &str) -> StorageKey {
    format!("{cluster_id}/{name}")
}

/// Snapshot of how many remote calls the backend has served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    /// Number of get calls.
    pub get: u64,
    /// Number of create calls.
    pub create: u64,
    /// Number of delete calls.
    pub delete: u64,
}

impl CallCounts {
    /// Total remote calls across all operations.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.get + self.create + self.delete
    }
}

struct InjectedFailure {
    operation: Operation,
    error: ApiError,
}

/// In-memory database backend using a papaya lock-free HashMap.
///
/// One instance models one remote system: at most one record exists per
/// `(cluster_id, name)` key, create establishes the pairing and delete
/// removes it.
#[derive(Default)]
pub struct InMemoryDatabaseApi {
    data: PapayaHashMap<StorageKey, DatabaseInfo>,
    get_calls: AtomicU64,
    create_calls: AtomicU64,
    delete_calls: AtomicU64,
    fail_next: Mutex<Option<InjectedFailure>>,
}

impl InMemoryDatabaseApi {
    /// Creates a new empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the per-operation call counters.
    ///
    /// Every invocation counts, including ones that fail: a failed call is
    /// still a remote round-trip.
    #[must_use]
    pub fn call_counts(&self) -> CallCounts {
        CallCounts {
            get: self.get_calls.load(Ordering::SeqCst),
            create: self.create_calls.load(Ordering::SeqCst),
            delete: self.delete_calls.load(Ordering::SeqCst),
        }
    }

    /// Arms a one-shot failure: the next call of `operation` returns `error`
    /// instead of touching the store.
    pub fn fail_next(&self, operation: Operation, error: ApiError) {
        let mut slot = self.fail_next.lock().expect("failure slot poisoned");
        *slot = Some(InjectedFailure { operation, error });
    }

    fn take_failure(&self, operation: Operation) -> Option<ApiError> {
        let mut slot = self.fail_next.lock().expect("failure slot poisoned");
        if slot.as_ref().is_some_and(|f| f.operation == operation) {
            slot.take().map(|f| f.error)
        } else {
            None
        }
    }

    /// Returns `true` if a record exists under `(cluster_id, name)`.
    #[must_use]
    pub fn contains(&self, cluster_id: &str, name: &str) -> bool {
        self.data.pin().contains_key(&make_key(cluster_id, name))
    }

    /// Returns a copy of the stored record, if any.
    #[must_use]
    pub fn record(&self, cluster_id: &str, name: &str) -> Option<DatabaseInfo> {
        self.data.pin().get(&make_key(cluster_id, name)).cloned()
    }

    /// Number of records across all clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.pin().len()
    }

    /// Returns `true` if no records exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every database in `cluster_id` out-of-band, the way the
    /// remote system cascades a parent-cluster deletion. Returns how many
    /// records were removed.
    ///
    /// Subsequent gets and deletes of the children observe plain not-found;
    /// no other signal is emitted.
    pub fn drop_cluster(&self, cluster_id: &str) -> usize {
        let prefix = format!("{cluster_id}/");
        let guard = self.data.pin();
        let doomed: Vec<StorageKey> = guard
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &doomed {
            guard.remove(key);
        }
        doomed.len()
    }
}

#[async_trait]
impl DatabaseApi for InMemoryDatabaseApi {
    async fn get_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_failure(Operation::Read) {
            return Err(err);
        }
        self.data
            .pin()
            .get(&make_key(cluster_id, name))
            .cloned()
            .ok_or_else(|| ApiError::not_found(cluster_id, name))
    }

    async fn create_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_failure(Operation::Create) {
            return Err(err);
        }
        let key = make_key(cluster_id, name);
        let guard = self.data.pin();
        if guard.contains_key(&key) {
            return Err(ApiError::conflict(cluster_id, name));
        }
        let info = DatabaseInfo::new(name);
        guard.insert(key, info.clone());
        Ok(info)
    }

    async fn delete_db(&self, cluster_id: &str, name: &str) -> Result<(), ApiError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.take_failure(Operation::Delete) {
            return Err(err);
        }
        match self.data.pin().remove(&make_key(cluster_id, name)) {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found(cluster_id, name)),
        }
    }
}
