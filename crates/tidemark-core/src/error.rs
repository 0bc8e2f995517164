//! Error taxonomy for reconciliation operations.
//!
//! Absence of the remote record is deliberately not represented here: reads
//! return `Ok(None)` and deletes treat a concurrent not-found as success, so
//! "does not exist" flows through the type system as data, never as an error.

use std::fmt;

/// The remote operation a failure is attributed to.
///
/// Attached to every propagated remote failure so the caller can decide
/// whether retrying the whole reconciliation pass makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Remote create call.
    Create,
    /// Remote get call.
    Read,
    /// Remote delete call.
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Read => write!(f, "read"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Errors that can occur during a reconciliation pass.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// A record with the same name already exists in the cluster.
    #[error("database already exists: {cluster_id}/{name}")]
    Conflict {
        /// The cluster the duplicate lives in.
        cluster_id: String,
        /// The duplicated database name.
        name: String,
    },

    /// An immutable field was changed in the desired state.
    ///
    /// Raised before any remote call is issued, so a bad declaration can
    /// never orphan the existing record.
    #[error("immutable field changed: {field}")]
    ImmutableField {
        /// The field that cannot be changed after creation.
        field: &'static str,
    },

    /// The desired-state record failed validation.
    #[error("invalid spec: {message}")]
    InvalidSpec {
        /// Description of what is wrong with the declaration.
        message: String,
    },

    /// A remote call failed; the cause is preserved verbatim.
    #[error("remote {operation} failed")]
    Remote {
        /// The operation that was being attempted.
        operation: Operation,
        /// The underlying API or transport failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ReconcileError {
    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(cluster_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Conflict {
            cluster_id: cluster_id.into(),
            name: name.into(),
        }
    }

    /// Creates a new `ImmutableField` error.
    #[must_use]
    pub fn immutable_field(field: &'static str) -> Self {
        Self::ImmutableField { field }
    }

    /// Creates a new `InvalidSpec` error.
    #[must_use]
    pub fn invalid_spec(message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            message: message.into(),
        }
    }

    /// Creates a new `Remote` error tagged with the attempted operation.
    #[must_use]
    pub fn remote(
        operation: Operation,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Remote {
            operation,
            source: Box::new(source),
        }
    }

    /// Returns `true` if this is a conflict error.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Returns `true` if this is an immutable-field error.
    #[must_use]
    pub fn is_immutable_field(&self) -> bool {
        matches!(self, Self::ImmutableField { .. })
    }

    /// Returns `true` if this is a spec validation error.
    #[must_use]
    pub fn is_invalid_spec(&self) -> bool {
        matches!(self, Self::InvalidSpec { .. })
    }

    /// Returns `true` if this is a propagated remote failure.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Returns the attempted operation for remote failures.
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Remote { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}
