//! # HTTP Client
//!
//! [`HttpClient`] is the seam between the fetch layer and the network. The
//! production implementation, [`RestClient`], is built explicitly from a base
//! URL and optional bearer token and then injected wherever it is needed, so
//! tests can pass a [`MockHttpClient`](crate::mock::MockHttpClient) instead.

use crate::envelope::HttpResponse;
use crate::error::FetchError;
use crate::request::{HttpRequest, Method};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Anything that can perform a request against the backend.
///
/// Implementations resolve with the decoded body for 2xx responses and return
/// a [`FetchError`] for everything else, non-2xx statuses included.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;

    async fn get(&self, path: &str) -> Result<HttpResponse, FetchError> {
        self.send(HttpRequest::get(path)).await
    }
}

#[async_trait]
impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        (**self).send(request).await
    }
}

/// A `reqwest`-backed [`HttpClient`].
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl RestClient {
    /// Builds a client rooted at `base_url`. Relative request paths are joined
    /// onto it, so a trailing slash is added when missing.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|_| FetchError::InvalidEndpoint(base_url.to_string()))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport {
                url: base_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request path against the base URL. Absolute URLs pass
    /// through untouched.
    pub fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        if let Ok(absolute) = Url::parse(path) {
            return Ok(absolute);
        }
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|_| FetchError::InvalidEndpoint(path.to_string()))
    }
}

#[async_trait]
impl HttpClient for RestClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let url = self.resolve(&request.path)?;
        debug!(method = %request.method, %url, "Sending request");

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, url.clone());
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(%url, error = %e, "Request failed");
            if e.is_timeout() {
                FetchError::Timeout { url: url.to_string() }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })?
        };

        Ok(HttpResponse::new(url.to_string(), status.as_u16(), body))
    }
}
