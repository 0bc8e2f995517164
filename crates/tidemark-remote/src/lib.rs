//! # tidemark-remote
//!
//! The remote-API contract consumed by the tidemark reconciler.
//!
//! This crate defines the trait and error types every remote backend must
//! implement. It contains no implementations — those live in separate crates
//! (`tidemark-do` for the DigitalOcean REST API, `tidemark-memory` for the
//! in-process test double).
//!
//! The main trait is [`DatabaseApi`], which covers the full remote surface
//! the reconciler needs: get, create, and delete of a named database inside
//! a managed cluster. There is no update call because the remote system has
//! none — identity is the `(cluster_id, name)` pair itself.
//!
//! ## Implementing a backend
//!
//! ```ignore
//! use async_trait::async_trait;
//! use tidemark_remote::{ApiError, DatabaseApi, DatabaseInfo};
//!
//! struct MyBackend;
//!
//! #[async_trait]
//! impl DatabaseApi for MyBackend {
//!     async fn get_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError> {
//!         // ...
//!     }
//!     // ... other methods
//! }
//! ```

mod error;
mod traits;
mod types;

pub use error::ApiError;
pub use traits::DatabaseApi;
pub use types::DatabaseInfo;

/// Type alias for a shareable remote API instance.
pub type DynDatabaseApi = std::sync::Arc<dyn DatabaseApi>;
