//! # Fetch Errors
//!
//! This module defines the error types used throughout the fetch layer.
//! [`FetchError`] covers a single HTTP exchange; [`ClientError`] is what the
//! resource CRUD clients hand back to their callers.

use std::collections::BTreeMap;

/// Errors that can occur while issuing a single request.
///
/// Inside an aggregate fetch these never escape: the failing key is recorded
/// in the result's failure set and the error is logged.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FetchError {
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("Request to {url} timed out")]
    Timeout { url: String },
    #[error("Could not decode body from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("Invalid endpoint '{0}'")]
    InvalidEndpoint(String),
    #[error("Duplicate request key '{0}'")]
    DuplicateKey(String),
}

impl FetchError {
    /// The URL the failing request targeted, when one is known.
    pub fn url(&self) -> Option<&str> {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Timeout { url }
            | FetchError::Decode { url, .. } => Some(url),
            FetchError::InvalidEndpoint(endpoint) => Some(endpoint),
            FetchError::DuplicateKey(_) => None,
        }
    }
}

/// Errors returned by the resource CRUD clients.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ClientError {
    /// The request never produced a usable response.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The backend answered with `success: false`.
    #[error("Rejected by backend: {message}")]
    Rejected {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },

    /// The backend answered but the payload did not match the resource type.
    #[error("Unexpected payload: {0}")]
    Payload(String),
}

impl ClientError {
    /// Field-level validation messages, if the backend sent any.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            ClientError::Rejected { errors, .. } if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }
}

/// Errors raised when talking to a running [`FetchActor`](crate::FetchActor).
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum HandleError {
    #[error("Fetch actor closed")]
    ActorClosed,
    #[error("Fetch actor dropped response channel")]
    ActorDropped,
}
