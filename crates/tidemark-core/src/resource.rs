//! Record types for declaratively managed cluster databases.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ReconcileError;

/// Remote identity of a logical database: the `(cluster_id, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseKey {
    /// The parent cluster.
    pub cluster_id: String,
    /// The database name, unique within the cluster.
    pub name: String,
}

impl DatabaseKey {
    /// Creates a new `DatabaseKey`.
    #[must_use]
    pub fn new(cluster_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for DatabaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cluster_id, self.name)
    }
}

/// The operator-declared target configuration for one database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSpec {
    /// The parent cluster. Immutable after creation: the remote API has no
    /// way to move a database between clusters.
    pub cluster_id: String,
    /// The database name. Changing it forces a replace since the remote API
    /// has no rename call.
    pub name: String,
}

impl DatabaseSpec {
    /// Creates a new `DatabaseSpec`.
    #[must_use]
    pub fn new(cluster_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            name: name.into(),
        }
    }

    /// Validates the declaration before any remote call is issued.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::InvalidSpec` if `cluster_id` or `name` is
    /// empty.
    pub fn validate(&self) -> Result<(), ReconcileError> {
        if self.cluster_id.is_empty() {
            return Err(ReconcileError::invalid_spec("cluster_id must not be empty"));
        }
        if self.name.is_empty() {
            return Err(ReconcileError::invalid_spec("name must not be empty"));
        }
        Ok(())
    }

    /// Returns the remote identity this spec declares.
    #[must_use]
    pub fn key(&self) -> DatabaseKey {
        DatabaseKey::new(&self.cluster_id, &self.name)
    }
}

/// The last-confirmed view of the remote record.
///
/// Constructed only from successful remote responses; `observed_at` records
/// when the confirmation happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseState {
    /// The parent cluster.
    pub cluster_id: String,
    /// The database name as issued by the remote system.
    pub name: String,
    /// When this record was last confirmed against the remote API.
    #[serde(with = "time::serde::rfc3339")]
    pub observed_at: OffsetDateTime,
}

impl DatabaseState {
    /// Creates a `DatabaseState` observed at the current instant.
    #[must_use]
    pub fn observed_now(cluster_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            name: name.into(),
            observed_at: OffsetDateTime::now_utc(),
        }
    }

    /// Returns the remote identity of the observed record.
    #[must_use]
    pub fn key(&self) -> DatabaseKey {
        DatabaseKey::new(&self.cluster_id, &self.name)
    }

    /// Computes the field-level diff against a desired spec.
    ///
    /// Only declared fields participate; `observed_at` is bookkeeping and
    /// never counts as drift.
    #[must_use]
    pub fn diff(&self, desired: &DatabaseSpec) -> DatabaseDiff {
        DatabaseDiff {
            cluster_id_changed: self.cluster_id != desired.cluster_id,
            name_changed: self.name != desired.name,
        }
    }

    /// Returns `true` if the observed record already matches the spec.
    #[must_use]
    pub fn matches(&self, desired: &DatabaseSpec) -> bool {
        self.diff(desired).is_empty()
    }
}

/// Field-level drift between desired and observed state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatabaseDiff {
    /// The parent cluster differs. This field is immutable, so any such
    /// drift is a declaration error, not a converging action.
    pub cluster_id_changed: bool,
    /// The name differs; convergence requires a replace.
    pub name_changed: bool,
}

impl DatabaseDiff {
    /// Returns `true` if no declared field differs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.cluster_id_changed && !self.name_changed
    }
}
