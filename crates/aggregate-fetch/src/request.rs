//! # Requests
//!
//! The values that travel from callers to an [`HttpClient`](crate::HttpClient):
//! a single [`HttpRequest`], and the named [`RequestSet`] that one aggregate
//! fetch dispatches.

use crate::error::FetchError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP verbs used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// One request against the backend. `path` is relative to the client's base URL
/// unless it is already absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A logical key bound to the endpoint that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub key: String,
    pub endpoint: String,
}

impl RequestDescriptor {
    pub fn new(key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            endpoint: endpoint.into(),
        }
    }
}

/// The requests dispatched by one aggregate fetch, keyed by logical name.
///
/// Keys are unique; order carries no meaning because every request runs
/// concurrently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSet {
    requests: BTreeMap<String, String>,
}

impl RequestSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a request, rejecting a key that is already present.
    pub fn insert(&mut self, descriptor: RequestDescriptor) -> Result<(), FetchError> {
        if self.requests.contains_key(&descriptor.key) {
            return Err(FetchError::DuplicateKey(descriptor.key));
        }
        self.requests.insert(descriptor.key, descriptor.endpoint);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(
        mut self,
        key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, FetchError> {
        self.insert(RequestDescriptor::new(key, endpoint))?;
        Ok(self)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.requests.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.requests.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = RequestDescriptor> + '_ {
        self.requests
            .iter()
            .map(|(key, endpoint)| RequestDescriptor::new(key.clone(), endpoint.clone()))
    }
}

impl TryFrom<Vec<RequestDescriptor>> for RequestSet {
    type Error = FetchError;

    fn try_from(descriptors: Vec<RequestDescriptor>) -> Result<Self, Self::Error> {
        let mut set = RequestSet::new();
        for descriptor in descriptors {
            set.insert(descriptor)?;
        }
        Ok(set)
    }
}
