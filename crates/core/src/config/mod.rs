//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (FILLOUT_*) for the table backend
//! 2. Environment variables (KUDOS_*) for the service itself
//! 3. TOML config file (if KUDOS_CONFIG_FILE set)
//! 4. Built-in defaults

use std::collections::BTreeMap;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Table backend settings read from `FILLOUT_<FIELD>` variables.
const FILLOUT_FIELDS: [&str; 6] = [
    "testimonials_api_key",
    "base_url",
    "testimonials_db_id",
    "collections_table_id",
    "collection_testimonials_table_id",
    "testimonials_table_id",
];

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (FILLOUT_*)
/// 2. Environment variables (KUDOS_*)
/// 3. TOML config file (if KUDOS_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bearer token for the table API.
    ///
    /// Set via FILLOUT_TESTIMONIALS_API_KEY environment variable.
    #[serde(default)]
    pub testimonials_api_key: Option<String>,

    /// Base URL of the table API.
    ///
    /// Set via FILLOUT_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Database (base) holding the testimonial tables.
    ///
    /// Set via FILLOUT_TESTIMONIALS_DB_ID environment variable.
    #[serde(default)]
    pub testimonials_db_id: Option<String>,

    /// Table of named collections.
    ///
    /// Set via FILLOUT_COLLECTIONS_TABLE_ID environment variable.
    #[serde(default)]
    pub collections_table_id: Option<String>,

    /// Join table linking collections to testimonials with an order.
    ///
    /// Set via FILLOUT_COLLECTION_TESTIMONIALS_TABLE_ID environment variable.
    #[serde(default)]
    pub collection_testimonials_table_id: Option<String>,

    /// Table of full testimonial records.
    ///
    /// Set via FILLOUT_TESTIMONIALS_TABLE_ID environment variable.
    #[serde(default)]
    pub testimonials_table_id: Option<String>,

    /// Socket address the HTTP server binds to.
    ///
    /// Set via KUDOS_BIND_ADDR environment variable.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// HTTP request timeout in milliseconds for upstream calls.
    ///
    /// Set via KUDOS_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for upstream requests.
    ///
    /// Set via KUDOS_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Substring a collection name must contain to be selected.
    ///
    /// Set via KUDOS_COLLECTION_MATCH environment variable.
    #[serde(default = "default_collection_match")]
    pub collection_match: String,

    /// Exact collection name accepted when the substring does not match.
    ///
    /// Set via KUDOS_COLLECTION_EXACT environment variable.
    #[serde(default = "default_collection_exact")]
    pub collection_exact: String,

    /// How long a resolved collection id is reused, in seconds.
    ///
    /// Set via KUDOS_COLLECTION_TTL_SECS environment variable.
    #[serde(default = "default_collection_ttl_secs")]
    pub collection_ttl_secs: u64,
}

/// Table backend settings, present only when every secret is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablesSettings {
    pub api_key: String,
    pub base_url: String,
    pub database_id: String,
    pub collections_table_id: String,
    pub links_table_id: String,
    pub testimonials_table_id: String,
}

fn default_base_url() -> String {
    "https://tables.fillout.com/api/v1".into()
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_user_agent() -> String {
    "kudos/0.1".into()
}

fn default_collection_match() -> String {
    "DNC Reviews".into()
}

fn default_collection_exact() -> String {
    "DNC Reviews Collection".into()
}

fn default_collection_ttl_secs() -> u64 {
    3600
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            testimonials_api_key: None,
            base_url: default_base_url(),
            testimonials_db_id: None,
            collections_table_id: None,
            collection_testimonials_table_id: None,
            testimonials_table_id: None,
            bind_addr: default_bind_addr(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            collection_match: default_collection_match(),
            collection_exact: default_collection_exact(),
            collection_ttl_secs: default_collection_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Collection-id memo lifetime.
    pub fn collection_ttl(&self) -> Duration {
        Duration::from_secs(self.collection_ttl_secs)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("KUDOS_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment
            .merge(
                Env::prefixed("KUDOS_")
                    .ignore(&["CONFIG_FILE"])
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            )
            .merge(Serialized::defaults(fillout_env()))
    }

    /// Collect the table backend settings, failing with every absent variable listed.
    ///
    /// Secrets are checked per request rather than at startup so the service
    /// can boot and report the misconfiguration on the endpoint itself.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if any of the secrets is unset or empty.
    pub fn require_tables(&self) -> Result<TablesSettings, ConfigError> {
        let required = [
            ("FILLOUT_TESTIMONIALS_API_KEY", &self.testimonials_api_key),
            ("FILLOUT_TESTIMONIALS_DB_ID", &self.testimonials_db_id),
            ("FILLOUT_COLLECTIONS_TABLE_ID", &self.collections_table_id),
            ("FILLOUT_COLLECTION_TESTIMONIALS_TABLE_ID", &self.collection_testimonials_table_id),
            ("FILLOUT_TESTIMONIALS_TABLE_ID", &self.testimonials_table_id),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ConfigError::Missing {
                field: missing.join(", "),
                hint: "Set the FILLOUT_* environment variables for the testimonials base".into(),
            });
        }

        let value = |v: &Option<String>| v.clone().unwrap_or_default();
        Ok(TablesSettings {
            api_key: value(&self.testimonials_api_key),
            base_url: self.base_url.clone(),
            database_id: value(&self.testimonials_db_id),
            collections_table_id: value(&self.collections_table_id),
            links_table_id: value(&self.collection_testimonials_table_id),
            testimonials_table_id: value(&self.testimonials_table_id),
        })
    }
}

/// Backend ids and keys are taken verbatim, never type-parsed (`0042` stays text).
fn fillout_env() -> BTreeMap<&'static str, String> {
    FILLOUT_FIELDS
        .iter()
        .filter_map(|field| {
            let value = std::env::var(format!("FILLOUT_{}", field.to_uppercase())).ok()?;
            Some((*field, value))
        })
        .collect()
}
