//! # tidemark-memory
//!
//! In-memory implementation of the [`tidemark_remote::DatabaseApi`]
//! contract, used by reconciler tests and local dry-runs.
//!
//! Beyond the plain contract it offers test instrumentation:
//! - per-operation call counters, so tests can assert that a code path
//!   issued zero remote calls;
//! - one-shot injected failures for exercising error propagation;
//! - [`InMemoryDatabaseApi::drop_cluster`], which removes every record in a
//!   cluster out-of-band — the way the real system cascades deletion of
//!   child databases when their parent cluster is destroyed.
//!
//! # Example
//!
//! ```ignore
//! use tidemark_memory::InMemoryDatabaseApi;
//! use tidemark_remote::DatabaseApi;
//!
//! let api = InMemoryDatabaseApi::new();
//! api.create_db("cluster-1", "defaultdb").await?;
//! assert!(api.contains("cluster-1", "defaultdb"));
//! ```

mod storage;

pub use storage::{CallCounts, InMemoryDatabaseApi};

// Re-export the contract for convenience
pub use tidemark_remote::{ApiError, DatabaseApi, DatabaseInfo, DynDatabaseApi};

/// Creates a new shareable in-memory backend.
#[must_use]
pub fn create_database_api() -> DynDatabaseApi {
    std::sync::Arc::new(InMemoryDatabaseApi::new())
}
