//! # tidemark-core
//!
//! Core record types and the error taxonomy for the tidemark reconciler.
//!
//! This crate defines the shapes the rest of the workspace agrees on:
//! - [`DatabaseSpec`] — the operator-declared desired state of one logical
//!   database inside a managed cluster.
//! - [`DatabaseState`] — the last-confirmed view of the remote record.
//! - [`DatabaseKey`] — the remote identity, the `(cluster_id, name)` pair.
//!   The remote system issues no separate ID and offers no rename call, so
//!   the pair is the only handle a caller ever holds and a name change means
//!   replacing the record.
//! - [`ReconcileError`] — the failures a reconciliation pass can surface.
//!
//! It performs no I/O; everything here is plain data.

mod error;
mod resource;

pub use error::{Operation, ReconcileError};
pub use resource::{DatabaseDiff, DatabaseKey, DatabaseSpec, DatabaseState};
