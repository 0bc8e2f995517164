//! The reconciler: executes converging actions against the remote API.

use tracing::debug;

use tidemark_core::{DatabaseSpec, DatabaseState, Operation, ReconcileError};
use tidemark_remote::{ApiError, DynDatabaseApi};

use crate::plan::{ConvergeAction, plan};

/// Reconciles declared cluster databases against a remote API.
///
/// One reconciliation runs as a single sequential chain of remote calls;
/// the reconciler holds no mutable state of its own, so one instance (or
/// one shared client) can serve many resource instances concurrently.
/// Nothing is cached between calls — every read is a fresh round-trip, so
/// decisions are never made on stale drift information.
///
/// Remote failures are never swallowed: they propagate to the caller tagged
/// with the attempted [`Operation`]. Retry and timeout policy belong to the
/// caller and the transport.
pub struct Reconciler {
    api: DynDatabaseApi,
}

impl Reconciler {
    /// Creates a reconciler using the given remote client.
    #[must_use]
    pub fn new(api: DynDatabaseApi) -> Self {
        Self { api }
    }

    /// Creates the declared database remotely.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::InvalidSpec` if the declaration is
    /// malformed (checked before any remote call), `Conflict` if a database
    /// with the same name already exists in the cluster, and `Remote`
    /// tagged with `Operation::Create` for any other failure. A failed
    /// create yields no observed state.
    pub async fn create(&self, desired: &DatabaseSpec) -> Result<DatabaseState, ReconcileError> {
        desired.validate()?;
        debug!(key = %desired.key(), "creating database");
        match self.api.create_db(&desired.cluster_id, &desired.name).await {
            Ok(info) => Ok(DatabaseState::observed_now(&desired.cluster_id, info.name)),
            Err(ApiError::Conflict { cluster_id, name }) => {
                Err(ReconcileError::Conflict { cluster_id, name })
            }
            Err(err) => Err(ReconcileError::remote(Operation::Create, err)),
        }
    }

    /// Refreshes the observed state of `(cluster_id, name)`.
    ///
    /// Returns `Ok(None)` when the record does not exist remotely — absence
    /// is a valid terminal observation, and callers drop their local state
    /// in response. This also covers the remote system cascading a delete
    /// of the record when its parent cluster was destroyed out-of-band.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Remote` tagged with `Operation::Read` for
    /// any failure other than not-found; those must be surfaced and retried
    /// by the caller rather than mistaken for deletion.
    pub async fn read(
        &self,
        cluster_id: &str,
        name: &str,
    ) -> Result<Option<DatabaseState>, ReconcileError> {
        debug!(cluster_id, name, "reading database");
        match self.api.get_db(cluster_id, name).await {
            Ok(info) => Ok(Some(DatabaseState::observed_now(cluster_id, info.name))),
            Err(ApiError::NotFound { .. }) => {
                debug!(cluster_id, name, "database absent");
                Ok(None)
            }
            Err(err) => Err(ReconcileError::remote(Operation::Read, err)),
        }
    }

    /// Converges an existing record onto a changed declaration.
    ///
    /// Identity is name-based, so a name change cannot be a mutating call:
    /// the old identity is deleted and the new one created.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::ImmutableField` if `cluster_id` changed,
    /// before any remote call is issued. Failures from the underlying
    /// delete or create propagate with their own operation tags; if the
    /// delete succeeded but the create failed, no observed state is
    /// returned and the caller re-reads on its next pass.
    pub async fn update(
        &self,
        desired: &DatabaseSpec,
        observed: &DatabaseState,
    ) -> Result<DatabaseState, ReconcileError> {
        desired.validate()?;
        let diff = observed.diff(desired);
        if diff.cluster_id_changed {
            return Err(ReconcileError::immutable_field("cluster_id"));
        }
        if !diff.name_changed {
            return Ok(observed.clone());
        }
        debug!(old = %observed.key(), new = %desired.key(), "replacing database");
        self.delete(observed).await?;
        self.create(desired).await
    }

    /// Deletes the observed record remotely.
    ///
    /// A concurrent not-found is success: the target state ("does not
    /// exist") is already achieved.
    ///
    /// # Errors
    ///
    /// Returns `ReconcileError::Remote` tagged with `Operation::Delete` for
    /// any other failure. The prior observed state stays with the caller —
    /// a failed delete is never silently assumed to have succeeded.
    pub async fn delete(&self, observed: &DatabaseState) -> Result<(), ReconcileError> {
        debug!(key = %observed.key(), "deleting database");
        match self
            .api
            .delete_db(&observed.cluster_id, &observed.name)
            .await
        {
            Ok(()) => Ok(()),
            Err(ApiError::NotFound { .. }) => {
                debug!(key = %observed.key(), "database already absent");
                Ok(())
            }
            Err(err) => Err(ReconcileError::remote(Operation::Delete, err)),
        }
    }

    /// Runs one full reconciliation pass: plans, executes, and returns the
    /// new observed state (`None` once nothing exists remotely).
    ///
    /// # Errors
    ///
    /// Propagates planner errors (`ImmutableField`, `InvalidSpec`) without
    /// issuing any remote call, and execution errors from the individual
    /// operations.
    pub async fn reconcile(
        &self,
        desired: Option<&DatabaseSpec>,
        observed: Option<&DatabaseState>,
    ) -> Result<Option<DatabaseState>, ReconcileError> {
        let action = plan(desired, observed)?;
        debug!(%action, "planned convergence");
        match action {
            ConvergeAction::NoOp => Ok(observed.cloned()),
            ConvergeAction::Create => {
                // The planner yields Create only when a spec is present
                let Some(spec) = desired else { return Ok(None) };
                self.create(spec).await.map(Some)
            }
            ConvergeAction::Replace => {
                let (Some(spec), Some(state)) = (desired, observed) else {
                    return Ok(observed.cloned());
                };
                self.update(spec, state).await.map(Some)
            }
            ConvergeAction::Delete => {
                let Some(state) = observed else { return Ok(None) };
                self.delete(state).await?;
                Ok(None)
            }
        }
    }
}
