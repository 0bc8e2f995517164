//! Pure diff-and-converge planning.

use std::fmt;

use tidemark_core::{DatabaseSpec, DatabaseState, ReconcileError};

/// The converging action chosen by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergeAction {
    /// Desired and observed state already agree (or both are absent).
    NoOp,
    /// The record does not exist remotely and must be created.
    Create,
    /// The record exists under a different name; since the remote API has
    /// no rename call, convergence is delete-then-create.
    Replace,
    /// The declaration was removed; the remote record must be deleted.
    Delete,
}

impl fmt::Display for ConvergeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOp => write!(f, "no-op"),
            Self::Create => write!(f, "create"),
            Self::Replace => write!(f, "replace"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Decides how to converge observed state onto desired state.
///
/// Pure: issues no remote calls and touches no shared state, so a failed
/// plan is guaranteed to have changed nothing.
///
/// # Errors
///
/// Returns `ReconcileError::ImmutableField` if both records exist and the
/// desired state changes `cluster_id` — the record cannot be moved between
/// clusters, and failing here (before any remote call) avoids silently
/// orphaning it. Returns `ReconcileError::InvalidSpec` if the declaration
/// itself is malformed.
pub fn plan(
    desired: Option<&DatabaseSpec>,
    observed: Option<&DatabaseState>,
) -> Result<ConvergeAction, ReconcileError> {
    if let Some(spec) = desired {
        spec.validate()?;
    }
    match (desired, observed) {
        (None, None) => Ok(ConvergeAction::NoOp),
        (Some(_), None) => Ok(ConvergeAction::Create),
        (None, Some(_)) => Ok(ConvergeAction::Delete),
        (Some(spec), Some(state)) => {
            let diff = state.diff(spec);
            if diff.cluster_id_changed {
                Err(ReconcileError::immutable_field("cluster_id"))
            } else if diff.name_changed {
                Ok(ConvergeAction::Replace)
            } else {
                Ok(ConvergeAction::NoOp)
            }
        }
    }
}
