//! # Mock HTTP Client & Testing Guide
//!
//! [`MockHttpClient`] implements [`HttpClient`] entirely in memory. You queue
//! expectations per `(method, path)` and it answers matching requests in FIFO
//! order, optionally after a delay. Nothing touches the network.
//!
//! ## When to use the mock vs a real backend
//!
//! | Feature | MockHttpClient | RestClient |
//! |---------|----------------|------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | Deterministic; delays are explicit | Subject to the backend |
//! | **Error Injection** | Easy (`return_err`, `return_status`) | Hard |
//! | **Ordering tests** | `with_delay` controls settle order | Not controllable |
//!
//! ## Example
//!
//! ```rust
//! use aggregate_fetch::mock::MockHttpClient;
//! use aggregate_fetch::{AggregateFetcher, RequestSet, ResourceRegistry};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockHttpClient::new();
//!     mock.expect_get("/hero").return_ok(json!({ "data": { "title": "Solar" } }));
//!     mock.expect_get("/about").return_status(502);
//!
//!     let registry = ResourceRegistry::new().singular("hero").singular("about");
//!     let requests = RequestSet::new()
//!         .with("hero", "/hero")
//!         .and_then(|s| s.with("about", "/about"))
//!         .unwrap();
//!
//!     let mut fetcher = AggregateFetcher::new(mock.clone(), registry);
//!     let result = fetcher.fetch(&requests).await;
//!
//!     assert!(result.get("hero").is_some());
//!     assert!(result.is_failed("about"));
//!     mock.verify();
//! }
//! ```
//!
//! A request with no matching expectation panics, like an unexpected call on
//! any other mock.

use crate::client::HttpClient;
use crate::envelope::HttpResponse;
use crate::error::FetchError;
use crate::request::{HttpRequest, Method};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Route = (Method, String);

/// A queued answer for one route.
struct Expectation {
    response: Result<(u16, Value), FetchError>,
    delay: Option<Duration>,
}

/// An in-memory [`HttpClient`] with expectation tracking.
///
/// Clones share the same expectations and call log, so a test can keep one
/// clone for [`verify`](Self::verify) while another is owned by the code under
/// test.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    expectations: Arc<Mutex<HashMap<Route, VecDeque<Expectation>>>>,
    calls: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockHttpClient {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a request with the given method and path.
    pub fn expect(&mut self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            route: (method, path.into()),
            delay: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `GET` request.
    pub fn expect_get(&mut self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    /// Every request received so far, in arrival order.
    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        let remaining: usize = exps.values().map(VecDeque::len).sum();
        if remaining > 0 {
            let routes: Vec<String> = exps
                .iter()
                .filter(|(_, queue)| !queue.is_empty())
                .map(|((method, path), _)| format!("{method} {path}"))
                .collect();
            panic!("Not all expectations were met. {remaining} remaining: {routes:?}");
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.calls.lock().unwrap().push(request.clone());

        let route = (request.method, request.path.clone());
        let expectation = {
            let mut exps = self.expectations.lock().unwrap();
            exps.get_mut(&route).and_then(VecDeque::pop_front)
        };
        let Some(expectation) = expectation else {
            panic!("Unexpected request: {} {}", request.method, request.path);
        };

        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }

        let (status, body) = expectation.response?;
        if !(200..300).contains(&status) {
            return Err(FetchError::Status {
                url: request.path,
                status,
            });
        }
        Ok(HttpResponse::new(request.path, status, body))
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder {
    route: Route,
    delay: Option<Duration>,
    expectations: Arc<Mutex<HashMap<Route, VecDeque<Expectation>>>>,
}

impl ExpectationBuilder {
    /// Holds the answer back for `delay` before settling.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answers with `200` and the given body.
    pub fn return_ok(self, body: Value) {
        self.push(Ok((200, body)));
    }

    /// Answers with the given status and an empty body. Non-2xx statuses
    /// surface as [`FetchError::Status`].
    pub fn return_status(self, status: u16) {
        self.push(Ok((status, Value::Null)));
    }

    /// Fails the request with `error`.
    pub fn return_err(self, error: FetchError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(u16, Value), FetchError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.entry(self.route).or_default().push_back(Expectation {
            response,
            delay: self.delay,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_answers_in_fifo_order_per_route() {
        let mut mock = MockHttpClient::new();
        mock.expect_get("/products").return_ok(json!({ "data": [] }));
        mock.expect_get("/products").return_status(500);

        let first = mock.get("/products").await.unwrap();
        assert_eq!(first.body, json!({ "data": [] }));

        let second = mock.get("/products").await;
        assert_eq!(
            second,
            Err(FetchError::Status {
                url: "/products".into(),
                status: 500
            })
        );

        assert_eq!(mock.calls().len(), 2);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unmet_expectations() {
        let mut mock = MockHttpClient::new();
        mock.expect(Method::Delete, "/products/1").return_ok(json!({ "success": true }));
        mock.verify();
    }
}
