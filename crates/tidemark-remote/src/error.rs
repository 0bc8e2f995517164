//! Error types for the remote API contract.

/// Errors returned by remote API backends.
///
/// `NotFound` is an expected, terminal observation — callers translate it
/// into state-absence rather than treating it as a failure.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested database does not exist (HTTP 404).
    #[error("database not found: {cluster_id}/{name}")]
    NotFound {
        /// The cluster that was queried.
        cluster_id: String,
        /// The database name that was queried.
        name: String,
    },

    /// A database with the same name already exists in the cluster.
    #[error("database already exists: {cluster_id}/{name}")]
    Conflict {
        /// The cluster the duplicate lives in.
        cluster_id: String,
        /// The duplicated database name.
        name: String,
    },

    /// The API token was rejected (HTTP 401).
    #[error("unauthorized: the API token was rejected")]
    Unauthorized,

    /// Any other non-2xx response from the remote API.
    #[error("remote API error (HTTP {status}): {message}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The error message from the response body, if any.
        message: String,
    },

    /// The request never produced a usable response.
    #[error("transport error: {source}")]
    Transport {
        /// The underlying connection or deserialization failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApiError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(cluster_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            cluster_id: cluster_id.into(),
            name: name.into(),
        }
    }

    /// Creates a new `Conflict` error.
    #[must_use]
    pub fn conflict(cluster_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Conflict {
            cluster_id: cluster_id.into(),
            name: name.into(),
        }
    }

    /// Creates a new `Api` error.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a new `Transport` error.
    #[must_use]
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport {
            source: Box::new(source),
        }
    }

    /// Returns `true` if this is a not-found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a conflict error.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Returns `true` if this is an authorization failure.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
