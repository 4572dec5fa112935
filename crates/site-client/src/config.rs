//! # Configuration
//!
//! [`SiteConfig`] is assembled in layers, later layers winning:
//!
//! 1. built-in defaults,
//! 2. an optional TOML file,
//! 3. environment variables (a `.env` file is loaded first if present),
//! 4. command-line flags, applied by the binary.
//!
//! | Variable                    | TOML key               | Default                 |
//! |-----------------------------|------------------------|-------------------------|
//! | `SITE_API_BASE_URL`         | `base_url`             | required                |
//! | `SITE_API_TOKEN`            | `api_token`            | none                    |
//! | `SITE_REQUEST_TIMEOUT_SECS` | `request_timeout_secs` | `10`                    |
//! | `SITE_RETAIN_STALE`         | `retain_stale`         | `false`                 |
//! | n/a                         | `[endpoints]` table    | per-section defaults    |
//!
//! ```toml
//! base_url = "https://api.example.com/api"
//! request_timeout_secs = 5
//!
//! [endpoints]
//! hero = "/v2/hero-section"
//! ```

use crate::error::ConfigError;
use aggregate_fetch::{FetchOptions, RetentionPolicy};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration for the site client.
#[derive(Clone, PartialEq)]
pub struct SiteConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub retain_stale: bool,
    /// Endpoint overrides keyed by section key (e.g. `hero`).
    pub endpoints: BTreeMap<String, String>,
}

impl std::fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .field("retain_stale", &self.retain_stale)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

/// The on-disk shape. Every field is optional so a file can hold a partial
/// configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    api_token: Option<String>,
    request_timeout_secs: Option<u64>,
    retain_stale: Option<bool>,
    #[serde(default)]
    endpoints: BTreeMap<String, String>,
}

impl SiteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retain_stale: false,
            endpoints: BTreeMap::new(),
        }
    }

    /// Loads the optional TOML file, then overlays the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let file = match file {
            Some(path) => Self::read_file(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_file(&text, &path.display().to_string())
    }

    fn parse_file(text: &str, path: &str) -> Result<FileConfig, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = env("SITE_API_BASE_URL")
            .or(file.base_url)
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("SITE_API_BASE_URL"))?;

        let request_timeout_secs = match env("SITE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "SITE_REQUEST_TIMEOUT_SECS",
                reason: format!("'{raw}' is not a whole number of seconds"),
            })?,
            None => file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "SITE_REQUEST_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let retain_stale = match env("SITE_RETAIN_STALE") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
                key: "SITE_RETAIN_STALE",
                reason: format!("'{raw}' is not a boolean"),
            })?,
            None => file.retain_stale.unwrap_or(false),
        };

        Ok(Self {
            base_url,
            api_token: env("SITE_API_TOKEN").or(file.api_token),
            request_timeout: Duration::from_secs(request_timeout_secs),
            retain_stale,
            endpoints: file.endpoints,
        })
    }

    /// Fetch options derived from this configuration.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            request_timeout: Some(self.request_timeout),
            retention: if self.retain_stale {
                RetentionPolicy::RetainStale
            } else {
                RetentionPolicy::Replace
            },
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
