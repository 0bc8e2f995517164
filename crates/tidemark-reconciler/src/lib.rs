//! # tidemark-reconciler
//!
//! The reconciliation core: given a desired-state record and (optionally) a
//! last-known observed-state record, decide which of {no-op, create,
//! replace, delete} converges the remote system, issue the remote calls,
//! and map the response back into a new observed-state record.
//!
//! The remote client is injected through [`Reconciler::new`] — there are no
//! package-level singletons. Planning ([`plan`]) is pure and issues no
//! remote calls, so an orchestrator can preview a convergence before
//! applying it.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tidemark_core::DatabaseSpec;
//! use tidemark_reconciler::Reconciler;
//!
//! let reconciler = Reconciler::new(Arc::new(client));
//! let desired = DatabaseSpec::new(cluster_id, "defaultdb");
//! let observed = reconciler.reconcile(Some(&desired), None).await?;
//! ```

mod plan;
mod reconciler;

pub use plan::{ConvergeAction, plan};
pub use reconciler::Reconciler;
