//! Error types for the admin clients and configuration.

use aggregate_fetch::ClientError;
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during admin operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    /// The input was rejected before it reached the backend.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backend refused the change; `fields` holds per-field messages.
    #[error("{message}")]
    Validation {
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },

    /// The backend could not be reached or answered with an error status.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with something that is not the expected record.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<ClientError> for AdminError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Rejected { message, errors } => AdminError::Validation {
                message,
                fields: errors,
            },
            ClientError::Fetch(e) => AdminError::Unavailable(e.to_string()),
            ClientError::Payload(e) => AdminError::UnexpectedResponse(e),
        }
    }
}

/// Errors raised while loading [`SiteConfig`](crate::config::SiteConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
