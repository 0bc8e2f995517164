//! Typed TOML documents for declared and observed state.
//!
//! The spec file carries the declaration, the state file the last-confirmed
//! observation. Both are structured documents — no stringly-typed assembly.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tidemark_core::{DatabaseSpec, DatabaseState};

/// The desired-state document: `[database]` with `cluster_id` and `name`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SpecDocument {
    pub database: DatabaseSpec,
}

/// The state file: the observation from the last successful apply, if any.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StateDocument {
    pub database: Option<DatabaseState>,
}

pub fn load_spec(path: &Path) -> Result<SpecDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read spec file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid spec file {}", path.display()))
}

/// Loads the state file; a missing file means nothing was ever observed.
pub fn load_state(path: &Path) -> Result<StateDocument> {
    if !path.exists() {
        return Ok(StateDocument::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read state file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid state file {}", path.display()))
}

pub fn save_state(path: &Path, state: &StateDocument) -> Result<()> {
    let content = toml::to_string_pretty(state).context("cannot serialize state")?;
    fs::write(path, content)
        .with_context(|| format!("cannot write state file {}", path.display()))
}
