//! # tidemark-do
//!
//! DigitalOcean REST implementation of the [`tidemark_remote::DatabaseApi`]
//! contract, covering the `v2/databases/{cluster_id}/dbs` endpoints.
//!
//! The client performs exactly one round-trip per call and maps HTTP
//! statuses into the `ApiError` taxonomy: 404 becomes `NotFound`, 409/422
//! become `Conflict`, 401 becomes `Unauthorized`, everything else non-2xx
//! becomes `Api` with the body's `message` field when present.
//!
//! # Example
//!
//! ```ignore
//! use tidemark_do::{DoClient, DoConfig};
//!
//! let config = DoConfig::from_env()?;
//! let client = DoClient::new(config)?;
//! let db = client.get_db("9cc10173-e9ea-4176-9dbc-a4cee4c4ff30", "defaultdb").await?;
//! ```

mod client;
mod config;

pub use client::DoClient;
pub use config::{DoConfig, DoConfigError};
