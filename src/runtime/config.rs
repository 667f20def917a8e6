//! Process configuration, read from `PRINT_JOBS_*` environment variables.

use crate::payload::PayloadSettings;
use crate::pipeline::PipelinePolicy;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const PROVIDER_CLIENT_KEY: &str = "PRINT_JOBS_PROVIDER_CLIENT_KEY";
pub const PROVIDER_CLIENT_SECRET: &str = "PRINT_JOBS_PROVIDER_CLIENT_SECRET";
pub const PROVIDER_SANDBOX: &str = "PRINT_JOBS_PROVIDER_SANDBOX";
pub const STORE_ENDPOINT: &str = "PRINT_JOBS_STORE_ENDPOINT";
pub const STORE_TOKEN: &str = "PRINT_JOBS_STORE_TOKEN";
pub const ASSET_BASE_URL: &str = "PRINT_JOBS_ASSET_BASE_URL";
pub const CATALOG_PATH: &str = "PRINT_JOBS_CATALOG_PATH";
pub const METADATA_PATH: &str = "PRINT_JOBS_METADATA_PATH";
pub const CONTACT_EMAIL: &str = "PRINT_JOBS_CONTACT_EMAIL";
pub const VERIFY_DELAY_SECS: &str = "PRINT_JOBS_VERIFY_DELAY_SECS";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Only the sandbox print provider is available; PRINT_JOBS_PROVIDER_SANDBOX must not be \"false\"")]
    ProductionProviderUnavailable,
}

/// Everything a run needs to know about its surroundings.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub provider_client_key: String,
    pub provider_client_secret: String,
    pub provider_sandbox: bool,
    /// Location of the order journal.
    pub store_endpoint: PathBuf,
    pub store_token: String,
    pub asset_base_url: String,
    pub catalog_path: PathBuf,
    pub metadata_path: PathBuf,
    pub contact_email: String,
    pub verify_delay: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let verify_delay = match get(VERIFY_DELAY_SECS) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    key: VERIFY_DELAY_SECS,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
                Duration::from_secs(secs)
            }
            None => PipelinePolicy::default().verify_delay,
        };

        Ok(Self {
            provider_client_key: get(PROVIDER_CLIENT_KEY).unwrap_or_default(),
            provider_client_secret: get(PROVIDER_CLIENT_SECRET).unwrap_or_default(),
            provider_sandbox: get(PROVIDER_SANDBOX).map_or(true, |v| v.trim() != "false"),
            store_endpoint: required(STORE_ENDPOINT)?.into(),
            store_token: get(STORE_TOKEN).unwrap_or_default(),
            asset_base_url: get(ASSET_BASE_URL).unwrap_or_default(),
            catalog_path: required(CATALOG_PATH)?.into(),
            metadata_path: required(METADATA_PATH)?.into(),
            contact_email: required(CONTACT_EMAIL)?,
            verify_delay,
        })
    }

    pub fn payload_settings(&self) -> PayloadSettings {
        PayloadSettings {
            asset_base_url: self.asset_base_url.clone(),
            contact_email: self.contact_email.clone(),
        }
    }

    pub fn pipeline_policy(&self) -> PipelinePolicy {
        PipelinePolicy {
            verify_delay: self.verify_delay,
            ..PipelinePolicy::default()
        }
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("provider_client_key", &redacted(&self.provider_client_key))
            .field("provider_client_secret", &redacted(&self.provider_client_secret))
            .field("provider_sandbox", &self.provider_sandbox)
            .field("store_endpoint", &self.store_endpoint)
            .field("store_token", &redacted(&self.store_token))
            .field("asset_base_url", &self.asset_base_url)
            .field("catalog_path", &self.catalog_path)
            .field("metadata_path", &self.metadata_path)
            .field("contact_email", &self.contact_email)
            .field("verify_delay", &self.verify_delay)
            .finish()
    }
}
