//! Fillout/Zite tables API client.
//!
//! ### Protocol
//!
//! - **Endpoint**: `POST {base}/bases/{db}/tables/{table}/records/list`
//! - **Authentication**: `Authorization: Bearer <key>`.
//! - **Body**: `{filters?, limit}`; see [`ListRequest`].
//! - **Response**: `{records: [{id, fields | data}]}`.
//! - **Failures**: no retries. Non-2xx responses surface as
//!   [`TablesError::Status`] carrying the upstream body verbatim.

pub mod error;
pub mod request;
pub mod response;

pub use error::TablesError;
pub use request::{Condition, ListRequest};
pub use response::ListResponse;

use async_trait::async_trait;
use kudos_core::RawRecord;
use kudos_core::config::{AppConfig, TablesSettings};
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::source::RecordSource;

/// Default base URL for the tables API.
const DEFAULT_BASE_URL: &str = "https://tables.fillout.com/api/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "kudos/0.1";

/// Tables API client configuration.
#[derive(Debug, Clone)]
pub struct TablesConfig {
    /// Bearer token.
    pub api_key: String,
    /// Base URL (default: https://tables.fillout.com/api/v1).
    pub base_url: String,
    /// Database (base) id every table lives in.
    pub database_id: String,
    /// Request timeout (default: 20s).
    pub timeout: Duration,
    /// User-agent string (default: kudos/0.x).
    pub user_agent: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            database_id: String::new(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TablesConfig {
    /// Build from validated application configuration.
    pub fn from_settings(settings: &TablesSettings, config: &AppConfig) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
            database_id: settings.database_id.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Tables API client.
#[derive(Debug, Clone)]
pub struct TablesClient {
    http: reqwest::Client,
    config: Arc<TablesConfig>,
}

impl TablesClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TablesConfig) -> Result<Self, TablesError> {
        if config.api_key.is_empty() {
            return Err(TablesError::MissingApiKey);
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| TablesError::Network(Arc::new(e)))?;

        Ok(Self { http, config: Arc::new(config) })
    }

    fn list_url(&self, table_id: &str) -> String {
        format!("{}/bases/{}/tables/{}/records/list", self.config.base_url, self.config.database_id, table_id)
    }

    /// List records of a table.
    pub async fn list(&self, table_id: &str, req: &ListRequest) -> Result<Vec<RawRecord>, TablesError> {
        req.validate()?;

        let start = Instant::now();
        let url = self.list_url(table_id);

        tracing::debug!(table_id, limit = req.limit, "listing table records");

        let http_response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header(header::ACCEPT, "application/json")
            .json(req)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!(table_id, %status, "tables API response status");

        if !status.is_success() {
            let body = http_response.text().await.unwrap_or_default();
            return Err(TablesError::Status { status: status.as_u16(), body });
        }

        let bytes = http_response.bytes().await?;
        let api_response: ListResponse =
            serde_json::from_slice(&bytes).map_err(|e| TablesError::Parse(e.to_string()))?;
        let records = api_response.into_records();

        tracing::debug!(table_id, count = records.len(), "listed records in {:?}", start.elapsed());

        Ok(records)
    }
}

#[async_trait]
impl RecordSource for TablesClient {
    async fn list_records(&self, table_id: &str, request: &ListRequest) -> Result<Vec<RawRecord>, TablesError> {
        self.list(table_id, request).await
    }
}
