//! Wire-level types returned by remote API backends.

use serde::{Deserialize, Serialize};

/// A database record as reported by the remote API.
///
/// The remote object carries only the name; the cluster is implied by the
/// endpoint the record was fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    /// The database name as issued by the remote system.
    pub name: String,
}

impl DatabaseInfo {
    /// Creates a new `DatabaseInfo`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
