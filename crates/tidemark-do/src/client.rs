//! DigitalOcean REST client for cluster databases.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tidemark_remote::{ApiError, DatabaseApi, DatabaseInfo};

use crate::config::DoConfig;

/// Client for the `v2/databases/{cluster_id}/dbs` endpoints.
///
/// One instance can be shared across concurrently reconciled resources;
/// every call is a single round-trip with no internal retries.
pub struct DoClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl DoClient {
    /// Builds a client from the given config.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: DoConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(ApiError::transport)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    fn dbs_url(&self, cluster_id: &str) -> String {
        format!("{}/v2/databases/{cluster_id}/dbs", self.base_url)
    }

    fn db_url(&self, cluster_id: &str, name: &str) -> String {
        format!("{}/{name}", self.dbs_url(cluster_id))
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
    }
}

/// Response envelope: the API wraps the record in a `db` field.
#[derive(Debug, Deserialize)]
struct DbEnvelope {
    db: DbObject,
}

#[derive(Debug, Deserialize)]
struct DbObject {
    name: String,
}

#[derive(Debug, Serialize)]
struct CreateDbRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Maps a non-2xx response to the error taxonomy.
async fn read_error(resp: reqwest::Response, cluster_id: &str, name: &str) -> ApiError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    match status {
        404 => ApiError::not_found(cluster_id, name),
        // The API answers 409 or 422 for duplicate names depending on engine
        409 | 422 => ApiError::conflict(cluster_id, name),
        401 => ApiError::Unauthorized,
        _ => {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            ApiError::api(status, message)
        }
    }
}

#[async_trait]
impl DatabaseApi for DoClient {
    async fn get_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError> {
        let url = self.db_url(cluster_id, name);
        debug!(cluster_id, name, "fetching database");
        let resp = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.status().is_success() {
            return Err(read_error(resp, cluster_id, name).await);
        }
        let envelope: DbEnvelope = resp.json().await.map_err(ApiError::transport)?;
        Ok(DatabaseInfo::new(envelope.db.name))
    }

    async fn create_db(&self, cluster_id: &str, name: &str) -> Result<DatabaseInfo, ApiError> {
        let url = self.dbs_url(cluster_id);
        debug!(cluster_id, name, "creating database");
        let resp = self
            .request(reqwest::Method::POST, &url)
            .json(&CreateDbRequest { name })
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.status().is_success() {
            return Err(read_error(resp, cluster_id, name).await);
        }
        let envelope: DbEnvelope = resp.json().await.map_err(ApiError::transport)?;
        Ok(DatabaseInfo::new(envelope.db.name))
    }

    async fn delete_db(&self, cluster_id: &str, name: &str) -> Result<(), ApiError> {
        let url = self.db_url(cluster_id, name);
        debug!(cluster_id, name, "deleting database");
        let resp = self
            .request(reqwest::Method::DELETE, &url)
            .send()
            .await
            .map_err(ApiError::transport)?;
        if !resp.status().is_success() {
            return Err(read_error(resp, cluster_id, name).await);
        }
        Ok(())
    }
}
