//! End-to-end reconciliation flows against the in-memory remote backend.
//!
//! These mirror the lifecycle an orchestrator drives: create a declared
//! database, observe it, rename it (replace), and tear it down — plus the
//! failure paths the reconciler must surface rather than swallow.

use std::sync::Arc;

use uuid::Uuid;

use tidemark_core::{DatabaseSpec, Operation};
use tidemark_memory::InMemoryDatabaseApi;
use tidemark_reconciler::Reconciler;
use tidemark_remote::ApiError;

fn harness() -> (Arc<InMemoryDatabaseApi>, Reconciler) {
    let api = Arc::new(InMemoryDatabaseApi::new());
    let reconciler = Reconciler::new(api.clone());
    (api, reconciler)
}

fn cluster_id() -> String {
    Uuid::new_v4().to_string()
}

fn db_name() -> String {
    format!("foobar-test-db-{}", Uuid::new_v4().simple())
}

#[tokio::test]
async fn create_then_read_round_trips() {
    let (_api, reconciler) = harness();
    let desired = DatabaseSpec::new(cluster_id(), db_name());

    let created = reconciler.create(&desired).await.expect("create");
    assert_eq!(created.cluster_id, desired.cluster_id);
    assert_eq!(created.name, desired.name);

    let observed = reconciler
        .read(&desired.cluster_id, &desired.name)
        .await
        .expect("read")
        .expect("present");
    assert!(observed.matches(&desired));
}

#[tokio::test]
async fn delete_then_read_is_absent() {
    let (_api, reconciler) = harness();
    let desired = DatabaseSpec::new(cluster_id(), db_name());

    let observed = reconciler.create(&desired).await.expect("create");
    reconciler.delete(&observed).await.expect("delete");

    let after = reconciler
        .read(&desired.cluster_id, &desired.name)
        .await
        .expect("read");
    assert!(after.is_none());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (_api, reconciler) = harness();
    let desired = DatabaseSpec::new(cluster_id(), db_name());

    let observed = reconciler.create(&desired).await.expect("create");
    reconciler.delete(&observed).await.expect("first delete");
    // Second delete observes not-found, which is the target state
    reconciler.delete(&observed).await.expect("second delete");
}

#[tokio::test]
async fn rename_replaces_old_identity_with_new() {
    let (api, reconciler) = harness();
    let cluster = cluster_id();
    let name = db_name();
    let renamed = format!("{name}-up");

    let desired = DatabaseSpec::new(&cluster, &name);
    let observed = reconciler.create(&desired).await.expect("create");

    let updated_spec = DatabaseSpec::new(&cluster, &renamed);
    let new_observed = reconciler
        .reconcile(Some(&updated_spec), Some(&observed))
        .await
        .expect("reconcile")
        .expect("present");

    assert_eq!(new_observed.name, renamed);
    assert!(!api.contains(&cluster, &name));
    assert!(api.contains(&cluster, &renamed));
    assert_eq!(api.len(), 1);

    // The old name reads as absent, the new one round-trips
    assert!(reconciler.read(&cluster, &name).await.expect("read").is_none());
    let fetched = reconciler
        .read(&cluster, &renamed)
        .await
        .expect("read")
        .expect("present");
    assert!(fetched.matches(&updated_spec));
}

#[tokio::test]
async fn cluster_change_fails_fast_with_zero_remote_calls() {
    let (api, reconciler) = harness();
    let desired = DatabaseSpec::new(cluster_id(), db_name());
    let observed = reconciler.create(&desired).await.expect("create");

    let before = api.call_counts();
    let moved = DatabaseSpec::new(cluster_id(), desired.name.clone());

    let err = reconciler
        .reconcile(Some(&moved), Some(&observed))
        .await
        .unwrap_err();
    assert!(err.is_immutable_field());
    assert_eq!(api.call_counts(), before);

    let err = reconciler.update(&moved, &observed).await.unwrap_err();
    assert!(err.is_immutable_field());
    assert_eq!(api.call_counts(), before);
}

#[tokio::test]
async fn create_conflict_leaves_existing_record_unchanged() {
    let (api, reconciler) = harness();
    let desired = DatabaseSpec::new(cluster_id(), db_name());

    reconciler.create(&desired).await.expect("create");
    let err = reconciler.create(&desired).await.unwrap_err();
    assert!(err.is_conflict());

    let record = api
        .record(&desired.cluster_id, &desired.name)
        .expect("record survives the conflict");
    assert_eq!(record.name, desired.name);
}

#[tokio::test]
async fn cascaded_cluster_deletion_reads_as_normal_absence() {
    let (api, reconciler) = harness();
    let cluster = cluster_id();
    let desired = DatabaseSpec::new(&cluster, db_name());
    let observed = reconciler.create(&desired).await.expect("create");

    // Parent cluster destroyed out-of-band; children go with it
    assert_eq!(api.drop_cluster(&cluster), 1);

    let after = reconciler
        .read(&desired.cluster_id, &desired.name)
        .await
        .expect("read is not an error");
    assert!(after.is_none());

    // Deleting the stale observation is equally fine
    reconciler.delete(&observed).await.expect("delete");
}

#[tokio::test]
async fn failed_delete_keeps_prior_state_and_tags_operation() {
    let (api, reconciler) = harness();
    let desired = DatabaseSpec::new(cluster_id(), db_name());
    let observed = reconciler.create(&desired).await.expect("create");

    api.fail_next(Operation::Delete, ApiError::api(500, "backend unavailable"));
    let err = reconciler.delete(&observed).await.unwrap_err();
    assert!(err.is_remote());
    assert_eq!(err.operation(), Some(Operation::Delete));

    // Never silently assumed to have succeeded
    assert!(api.contains(&desired.cluster_id, &desired.name));
}

#[tokio::test]
async fn failed_create_yields_no_observed_state() {
    let (api, reconciler) = harness();
    let desired = DatabaseSpec::new(cluster_id(), db_name());

    api.fail_next(Operation::Create, ApiError::api(503, "maintenance"));
    let err = reconciler.create(&desired).await.unwrap_err();
    assert_eq!(err.operation(), Some(Operation::Create));

    assert!(!api.contains(&desired.cluster_id, &desired.name));
    let after = reconciler
        .read(&desired.cluster_id, &desired.name)
        .await
        .expect("read");
    assert!(after.is_none());
}

#[tokio::test]
async fn read_failure_is_not_mistaken_for_absence() {
    let (api, reconciler) = harness();
    let desired = DatabaseSpec::new(cluster_id(), db_name());
    reconciler.create(&desired).await.expect("create");

    api.fail_next(Operation::Read, ApiError::api(500, "flaky"));
    let err = reconciler
        .read(&desired.cluster_id, &desired.name)
        .await
        .unwrap_err();
    assert_eq!(err.operation(), Some(Operation::Read));
}

#[tokio::test]
async fn reconcile_covers_the_full_lifecycle() {
    let (api, reconciler) = harness();
    let cluster = cluster_id();
    let desired = DatabaseSpec::new(&cluster, db_name());

    // Nothing declared, nothing observed
    let out = reconciler.reconcile(None, None).await.expect("reconcile");
    assert!(out.is_none());
    assert_eq!(api.call_counts().total(), 0);

    // Declared but absent: create
    let observed = reconciler
        .reconcile(Some(&desired), None)
        .await
        .expect("reconcile")
        .expect("present");
    assert!(observed.matches(&desired));

    // Converged: no further calls
    let before = api.call_counts();
    let out = reconciler
        .reconcile(Some(&desired), Some(&observed))
        .await
        .expect("reconcile")
        .expect("present");
    assert!(out.matches(&desired));
    assert_eq!(api.call_counts(), before);

    // Declaration removed: delete
    let out = reconciler
        .reconcile(None, Some(&observed))
        .await
        .expect("reconcile");
    assert!(out.is_none());
    assert!(api.is_empty());
}

#[tokio::test]
async fn invalid_spec_is_rejected_before_any_remote_call() {
    let (api, reconciler) = harness();
    let desired = DatabaseSpec::new(cluster_id(), "");

    let err = reconciler.create(&desired).await.unwrap_err();
    assert!(err.is_invalid_spec());

    let err = reconciler.reconcile(Some(&desired), None).await.unwrap_err();
    assert!(err.is_invalid_spec());

    assert_eq!(api.call_counts().total(), 0);
}
