//! The remote API trait all backends must implement.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::types::DatabaseInfo;

/// Remote API surface for logical databases inside a managed cluster.
///
/// Implementations must be thread-safe (`Send + Sync`) so a single client
/// can be shared across concurrently reconciled resource instances. The
/// contract deliberately has no update call: the remote identity is the
/// `(cluster_id, name)` pair, so a rename is a delete followed by a create.
///
/// Backends must not retry internally — retry policy belongs to the caller.
#[async_trait]
pub trait DatabaseApi: Send + Sync {
    /// Fetches the database identified by `(cluster_id, name)`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no such database exists. Any other
    /// variant signals a genuine failure.
    async fn get_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError>;

    /// Creates a database named `name` in the given cluster.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Conflict` if a database with the same name already
    /// exists in the cluster; the existing record is left unchanged.
    async fn create_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError>;

    /// Deletes the database identified by `(cluster_id, name)`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the database does not exist. Callers
    /// that only care about the end state treat that as success.
    async fn delete_db(&self, cluster_id: &str, name: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl<T> DatabaseApi for std::sync::Arc<T>
where
    T: DatabaseApi + ?Sized,
{
    async fn get_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError> {
        (**self).get_db(cluster_id, name).await
    }

    async fn create_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError> {
        (**self).create_db(cluster_id, name).await
    }

    async fn delete_db(&self, cluster_id: &str, name: &str) -> Result<(), ApiError> {
        (**self).delete_db(cluster_id, name).await
    }
}

#[async_trait]
impl<T> DatabaseApi for Box<T>
where
    T: DatabaseApi + ?Sized,
{
    async fn get_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError> {
        (**self).get_db(cluster_id, name).await
    }

    async fn create_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError> {
        (**self).create_db(cluster_id, name).await
    }

    async fn delete_db(&self, cluster_id: &str, name: &str) -> Result<(), ApiError> {
        (**self).delete_db(cluster_id, name).await
    }
}
